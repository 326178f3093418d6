// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser clock and one-shot timers.

use wasm_bindgen::prelude::*;

use trail_core::time::Duration;

// Bound as globals; no `Window` lookup in the event handler.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout_raw(callback: &JsValue, delay_ms: i32) -> i32;
}

/// Converts a µs-tick duration to a whole-millisecond `setTimeout` delay.
///
/// Rounds up so the timer never fires before the duration has elapsed.
pub(crate) fn delay_millis(delay: Duration) -> i32 {
    i32::try_from(delay.ticks().div_ceil(1000)).unwrap_or(i32::MAX)
}

/// Schedules `callback` to run once after `delay`.
///
/// `callback` must be a one-shot JS function, e.g. from
/// [`Closure::once_into_js`], which frees itself after running.
pub(crate) fn set_timeout(callback: &JsValue, delay: Duration) {
    // The timer id is not kept: removals have no cancellation path.
    let _ = set_timeout_raw(callback, delay_millis(delay));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_millis_round_up() {
        assert_eq!(delay_millis(Duration(0)), 0);
        assert_eq!(delay_millis(Duration(1)), 1);
        assert_eq!(delay_millis(Duration(100_000)), 100);
        assert_eq!(delay_millis(Duration(100_001)), 101);
        assert_eq!(delay_millis(Duration(u64::MAX)), i32::MAX);
    }
}
