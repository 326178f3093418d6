// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trail markers.
//!
//! A [`Marker`] describes one transient image node: its identity, the fixed
//! content from the emitter's [`TrailConfig`](crate::config::TrailConfig) and
//! the pixel offsets taken from the pointer-move that created it. Markers are
//! immutable once built; a surface renders one node per marker and the node is
//! never moved or restyled afterwards.

use alloc::format;
use alloc::string::String;
use core::fmt;

use kurbo::Point;

use crate::config::TrailConfig;
use crate::pointer::PointerMove;

/// Identity of a marker within one emitter.
///
/// Ids are assigned in creation order starting at zero and are never reused,
/// so two markers at the same coordinates or created at the same instant are
/// still distinct.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

impl fmt::Debug for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarkerId({})", self.0)
    }
}

/// Lifecycle state of a marker.
///
/// `Inserted` is entered synchronously on notification; `Removed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerState {
    /// In the render tree with its removal task pending.
    Inserted,
    /// Removed from the render tree.
    Removed,
}

/// One point along the pointer's trail.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Identity of this marker.
    pub id: MarkerId,
    /// Image source.
    pub source: &'static str,
    /// Style class.
    pub class: &'static str,
    /// CSS `left` value, e.g. `"50px"`.
    pub left: String,
    /// CSS `top` value, e.g. `"80px"`.
    pub top: String,
    /// The pointer position the offsets were derived from.
    pub position: Point,
}

impl Marker {
    /// Builds the marker for a pointer-move notification.
    #[must_use]
    pub fn new(id: MarkerId, config: &TrailConfig, event: &PointerMove) -> Self {
        Self {
            id,
            source: config.source,
            class: config.class,
            left: css_px(event.client_x),
            top: css_px(event.client_y),
            position: event.position(),
        }
    }
}

/// Formats a coordinate as a CSS pixel string.
///
/// The number is rendered the way a browser stringifies it when concatenated
/// with `"px"`: integral values have no fractional part, negative zero prints
/// as `0`, non-finite values print as `NaN`/`Infinity`, and magnitudes outside
/// `[1e-6, 1e21)` switch to exponent notation with an explicit sign.
#[must_use]
pub fn css_px(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaNpx");
    }
    if value.is_infinite() {
        return if value > 0.0 {
            String::from("Infinitypx")
        } else {
            String::from("-Infinitypx")
        };
    }
    if value == 0.0 {
        return String::from("0px");
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        format!("{value}px")
    } else {
        // `{:e}` yields e.g. `1e21` / `1.5e-7`; browsers write `1e+21`.
        let exp = format!("{value:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{mantissa}e+{power}px")
            }
            _ => format!("{exp}px"),
        }
    }
}
