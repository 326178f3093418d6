// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for pointer trails.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomSurface`]: `<img>` marker elements under a container element
//! - [`WebTrail`]: `mousemove` subscription with explicit start/stop, one
//!   `setTimeout` per marker removal
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `trail_core/trace`, so a sink
//!   installed with [`WebTrail::with_sink`] receives lifecycle events.
//!   Without it the sink is stored but never called.

#![no_std]

extern crate alloc;

mod dom;
mod event;
mod timer;
mod trail;

pub use dom::DomSurface;
pub use trail::WebTrail;
pub use trail_core::surface::Surface;

use trail_core::time::{HostTime, Timebase};

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    let ms = timer::performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}
