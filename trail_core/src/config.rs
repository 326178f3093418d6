// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker content and lifetime presets.

use crate::time::{Duration, Timebase};

/// Relative path of the flag image every web marker shows.
pub const KENYA_FLAG_SOURCE: &str = "../assets/kenya-flag.png";

/// Class name the external stylesheet uses to size and layer markers.
pub const TRAIL_CLASS: &str = "trail";

/// Marker lifetime on the web host, in milliseconds.
pub const TRAIL_LIFETIME_MS: u64 = 100;

/// Fixed content and lifetime for every marker an emitter creates.
///
/// An emitter keeps its config for its whole life, so all of its markers share
/// the same `source` and `class` regardless of pointer coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrailConfig {
    /// Image source assigned to each marker.
    pub source: &'static str,
    /// Class name assigned to each marker.
    pub class: &'static str,
    /// Time from insertion until the marker's removal task is due.
    pub lifetime: Duration,
}

impl TrailConfig {
    /// Creates a config with explicit content and lifetime.
    #[must_use]
    pub const fn new(source: &'static str, class: &'static str, lifetime: Duration) -> Self {
        Self {
            source,
            class,
            lifetime,
        }
    }

    /// The web preset: Kenyan flag, `trail` class, 100 ms in µs ticks.
    #[must_use]
    pub const fn web() -> Self {
        Self::new(
            KENYA_FLAG_SOURCE,
            TRAIL_CLASS,
            Duration::from_millis(TRAIL_LIFETIME_MS, Timebase::MICROS),
        )
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self::web()
    }
}
