// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time for marker scheduling.
//!
//! [`HostTime`] is a point on the host's monotonic clock in backend-defined
//! ticks. On the web a tick is one microsecond of `performance.now()`; a
//! virtual clock in a test harness may use the same unit so that scripted
//! timestamps read like real ones.
//!
//! [`Duration`] is a span in the same ticks. [`Timebase`] converts ticks to
//! nanoseconds and is what lets a marker lifetime be written in milliseconds
//! independent of the tick unit.

use core::fmt;
use core::ops::{Add, Sub};

/// A point in time expressed as host ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Returns `self + duration`, clamped to the end of time.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.0))
    }

    /// Returns the time elapsed since `earlier`, or zero if `earlier` is later.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }

    /// Converts this time to fractional milliseconds using `timebase`.
    #[inline]
    #[must_use]
    pub fn as_millis_f64(self, timebase: Timebase) -> f64 {
        timebase.ticks_to_nanos(self.0) as f64 / 1_000_000.0
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for HostTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// A span of host ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Creates a duration of `millis` milliseconds in `timebase` ticks.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64, timebase: Timebase) -> Self {
        Self(timebase.nanos_to_ticks(millis.saturating_mul(1_000_000)))
    }

    /// Converts this duration to fractional milliseconds using `timebase`.
    #[inline]
    #[must_use]
    pub fn as_millis_f64(self, timebase: Timebase) -> f64 {
        timebase.ticks_to_nanos(self.0) as f64 / 1_000_000.0
    }
}

impl Add for Duration {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self.0)
    }
}

/// Rational conversion factor from ticks to nanoseconds.
///
/// `nanoseconds = ticks * numer / denom`
///
/// Both terms are non-zero, so conversion works in either direction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timebase {
    numer: u32,
    denom: u32,
}

impl Timebase {
    /// Ticks are nanoseconds.
    pub const NANOS: Self = Self { numer: 1, denom: 1 };

    /// Ticks are microseconds, as produced by the web backend.
    pub const MICROS: Self = Self {
        numer: 1000,
        denom: 1,
    };

    /// Creates a timebase with the given ratio.
    ///
    /// # Panics
    ///
    /// Panics if `numer` or `denom` is zero.
    #[inline]
    #[must_use]
    pub const fn new(numer: u32, denom: u32) -> Self {
        assert!(numer != 0, "timebase numerator must not be zero");
        assert!(denom != 0, "timebase denominator must not be zero");
        Self { numer, denom }
    }

    /// Converts a tick count to nanoseconds.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn ticks_to_nanos(self, ticks: u64) -> u64 {
        (ticks as u128 * self.numer as u128 / self.denom as u128) as u64
    }

    /// Converts nanoseconds to a tick count.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn nanos_to_ticks(self, nanos: u64) -> u64 {
        (nanos as u128 * self.denom as u128 / self.numer as u128) as u64
    }
}

impl fmt::Debug for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timebase({}/{})", self.numer, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_in_microsecond_ticks() {
        let d = Duration::from_millis(100, Timebase::MICROS);
        assert_eq!(d, Duration(100_000), "100ms is 100_000µs");
        assert!((d.as_millis_f64(Timebase::MICROS) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn millis_in_nanosecond_ticks() {
        assert_eq!(
            Duration::from_millis(3, Timebase::NANOS),
            Duration(3_000_000),
            "identity timebase"
        );
    }

    #[test]
    fn host_time_arithmetic() {
        let t = HostTime(10_000);
        assert_eq!(t + Duration(100_000), HostTime(110_000));
        assert_eq!(HostTime(110_000) - t, Duration(100_000));
        assert_eq!(t.saturating_duration_since(HostTime(20_000)), Duration::ZERO);
        assert_eq!(
            HostTime(u64::MAX).saturating_add(Duration(1)),
            HostTime(u64::MAX)
        );
    }

    #[test]
    fn custom_timebase_converts_both_ways() {
        // 100 ns ticks.
        let tb = Timebase::new(100, 1);
        assert_eq!(tb.ticks_to_nanos(10), 1_000);
        assert_eq!(tb.nanos_to_ticks(1_000), 10);
        assert_eq!(Duration::from_millis(1, tb), Duration(10_000));
    }

    #[test]
    #[should_panic(expected = "timebase numerator must not be zero")]
    fn zero_numerator_is_rejected() {
        let _ = Timebase::new(0, 1);
    }

    #[test]
    #[should_panic(expected = "timebase denominator must not be zero")]
    fn zero_denominator_is_rejected() {
        let _ = Timebase::new(1, 0);
    }

    #[test]
    fn host_time_in_millis() {
        let t = HostTime(120_000);
        assert!((t.as_millis_f64(Timebase::MICROS) - 120.0).abs() < 1e-9);
    }
}
