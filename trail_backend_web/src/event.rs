// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer coordinates from `MouseEvent`.
//!
//! `web_sys::MouseEvent::client_x` is typed `i32` outside
//! `web_sys_unstable_apis`, which truncates sub-pixel positions.
//! [`ClientPosition`] reads the same properties as `f64`.

use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use trail_core::pointer::PointerMove;

#[wasm_bindgen]
extern "C" {
    /// Structural view of a `MouseEvent`'s viewport coordinates.
    type ClientPosition;

    #[wasm_bindgen(method, getter, js_name = "clientX")]
    fn client_x(this: &ClientPosition) -> f64;

    #[wasm_bindgen(method, getter, js_name = "clientY")]
    fn client_y(this: &ClientPosition) -> f64;
}

/// Reads the viewport position of `event`, keeping fractional pixels.
pub(crate) fn pointer_move(event: &MouseEvent) -> PointerMove {
    let position: &ClientPosition = event.unchecked_ref();
    from_client(position.client_x(), position.client_y())
}

fn from_client(client_x: f64, client_y: f64) -> PointerMove {
    PointerMove::new(client_x, client_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_core::config::TrailConfig;
    use trail_core::marker::{Marker, MarkerId};

    #[test]
    fn coordinate_getters_are_f64() {
        // Pins the binding types: an `i32` getter here would drop sub-pixels.
        let _: fn(&ClientPosition) -> f64 = ClientPosition::client_x;
        let _: fn(&ClientPosition) -> f64 = ClientPosition::client_y;
    }

    #[test]
    fn sub_pixel_positions_reach_the_marker() {
        let pointer = from_client(50.75, 80.5);
        let marker = Marker::new(MarkerId(0), &TrailConfig::web(), &pointer);
        assert_eq!(marker.left, "50.75px");
        assert_eq!(marker.top, "80.5px");
    }
}
