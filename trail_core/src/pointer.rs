// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-move notifications as delivered by the host.

use kurbo::Point;

/// A pointer-move notification.
///
/// Coordinates are viewport-relative CSS pixels with the origin at the top
/// left. They may be fractional depending on the host. The record is owned by
/// the host and only read by the emitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerMove {
    /// Horizontal position (`clientX`).
    pub client_x: f64,
    /// Vertical position (`clientY`).
    pub client_y: f64,
}

impl PointerMove {
    /// Creates a notification at the given viewport position.
    #[inline]
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }

    /// Returns the position as a point.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}
