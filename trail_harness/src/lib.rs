// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic virtual-time driver for trail scenarios.
//!
//! [`Harness`] owns a [`TrailEmitter`] over a [`MemorySurface`] and a virtual
//! clock. Scripted [`Step`]s are replayed in time order, interleaved with the
//! emitter's removal tasks, and a [`Snapshot`] of the render root is recorded
//! after each event so that scenarios can assert exactly what was live when.
//!
//! When a removal is due at the same instant as a scripted step, the removal
//! runs first, matching a host whose timer queue drains before the next input
//! event is dispatched.

#![no_std]

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use trail_core::config::TrailConfig;
use trail_core::emitter::TrailEmitter;
use trail_core::marker::MarkerId;
use trail_core::pointer::PointerMove;
use trail_core::surface::MemorySurface;
use trail_core::time::HostTime;
use trail_core::trace::Tracer;

/// One scripted input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// A pointer-move notification.
    Move {
        /// Delivery time.
        at: HostTime,
        /// The notification.
        pointer: PointerMove,
    },
    /// The host subscribes the emitter.
    Subscribe {
        /// Time of the change.
        at: HostTime,
    },
    /// The host unsubscribes the emitter.
    Unsubscribe {
        /// Time of the change.
        at: HostTime,
    },
}

impl Step {
    /// A pointer move at `(x, y)` delivered at `at`.
    #[must_use]
    pub const fn pointer(at: HostTime, x: f64, y: f64) -> Self {
        Self::Move {
            at,
            pointer: PointerMove::new(x, y),
        }
    }

    /// When this step happens.
    #[must_use]
    pub const fn at(&self) -> HostTime {
        match *self {
            Self::Move { at, .. } | Self::Subscribe { at } | Self::Unsubscribe { at } => at,
        }
    }
}

/// The render root's live markers at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Virtual time of the snapshot.
    pub at: HostTime,
    /// Live markers, first inserted first.
    pub live: Vec<MarkerId>,
}

/// Replays a script against an emitter on a virtual clock.
#[derive(Debug)]
pub struct Harness {
    emitter: TrailEmitter<MemorySurface>,
    now: HostTime,
    script: VecDeque<Step>,
    snapshots: Vec<Snapshot>,
}

impl Harness {
    /// Creates a harness at time zero with the emitter already subscribed,
    /// as a page listener is from load.
    #[must_use]
    pub fn new(config: TrailConfig) -> Self {
        let mut emitter = TrailEmitter::new(MemorySurface::new(), config);
        emitter.subscribe(HostTime(0), &mut Tracer::none());
        Self {
            emitter,
            now: HostTime(0),
            script: VecDeque::new(),
            snapshots: Vec::new(),
        }
    }

    /// Adds a step to the script.
    ///
    /// Steps are kept in time order; steps at the same time run in the order
    /// they were pushed. Steps earlier than [`now`](Self::now) run on the next
    /// call to [`run_until`](Self::run_until).
    pub fn push(&mut self, step: Step) {
        let idx = self.script.partition_point(|s| s.at() <= step.at());
        self.script.insert(idx, step);
    }

    /// Adds every step from `steps`.
    pub fn extend(&mut self, steps: impl IntoIterator<Item = Step>) {
        for step in steps {
            self.push(step);
        }
    }

    /// Runs all scripted steps and removal tasks up to and including `until`,
    /// then moves the clock to `until`.
    ///
    /// Returns the number of markers removed.
    pub fn run_until(&mut self, until: HostTime, tracer: &mut Tracer<'_>) -> usize {
        let mut removed = 0;
        loop {
            let next_step = self.script.front().map(Step::at).filter(|&t| t <= until);
            let next_due = self.emitter.next_due().filter(|&t| t <= until);

            match (next_due, next_step) {
                (Some(due), step) if step.is_none_or(|s| due <= s) => {
                    self.now = self.now.max(due);
                    removed += self.emitter.advance(due, tracer);
                }
                (_, Some(_)) => {
                    let Some(step) = self.script.pop_front() else {
                        break;
                    };
                    self.now = self.now.max(step.at());
                    self.apply(step, tracer);
                }
                _ => break,
            }
            self.record();
        }
        self.now = self.now.max(until);
        removed
    }

    fn apply(&mut self, step: Step, tracer: &mut Tracer<'_>) {
        match step {
            Step::Move { at, pointer } => {
                let Ok(_) = self.emitter.notify(&pointer, at, tracer);
            }
            Step::Subscribe { at } => self.emitter.subscribe(at, tracer),
            Step::Unsubscribe { at } => self.emitter.unsubscribe(at, tracer),
        }
    }

    fn record(&mut self) {
        let snapshot = self.snapshot();
        self.snapshots.push(snapshot);
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.now
    }

    /// The live markers right now.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            at: self.now,
            live: self.emitter.surface().children().map(|m| m.id).collect(),
        }
    }

    /// Snapshots recorded after every step and every removal batch.
    #[must_use]
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Steps not yet replayed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// The emitter under test.
    #[must_use]
    pub fn emitter(&self) -> &TrailEmitter<MemorySurface> {
        &self.emitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// 1 ms in the web backend's µs ticks.
    const MS: u64 = 1_000;

    fn at(ms: u64) -> HostTime {
        HostTime(ms * MS)
    }

    #[test]
    fn single_move_lives_for_one_lifetime() {
        let mut h = Harness::new(TrailConfig::web());
        h.push(Step::pointer(at(0), 50.0, 80.0));

        h.run_until(at(99), &mut Tracer::none());
        let child = h.emitter().surface().get(MarkerId(0)).expect("live at 99ms");
        assert_eq!(child.left, "50px");
        assert_eq!(child.top, "80px");

        assert_eq!(h.run_until(at(100), &mut Tracer::none()), 1);
        assert!(h.snapshot().live.is_empty(), "removed at 100ms");
    }

    #[test]
    fn burst_drains_one_by_one() {
        let mut h = Harness::new(TrailConfig::web());
        h.extend([
            Step::pointer(at(0), 1.0, 1.0),
            Step::pointer(at(10), 2.0, 2.0),
            Step::pointer(at(20), 3.0, 3.0),
        ]);

        h.run_until(at(100), &mut Tracer::none());
        assert_eq!(h.snapshot().live, vec![MarkerId(1), MarkerId(2)]);
        h.run_until(at(110), &mut Tracer::none());
        assert_eq!(h.snapshot().live, vec![MarkerId(2)]);
        h.run_until(at(120), &mut Tracer::none());
        assert!(h.snapshot().live.is_empty());
    }

    #[test]
    fn removal_due_with_a_move_runs_first() {
        let mut h = Harness::new(TrailConfig::web());
        h.push(Step::pointer(at(0), 0.0, 0.0));
        h.push(Step::pointer(at(100), 1.0, 1.0));

        h.run_until(at(100), &mut Tracer::none());
        let lives: Vec<_> = h.snapshots().iter().map(|s| s.live.len()).collect();
        assert_eq!(lives, [1, 0, 1], "remove #0 before inserting #1");
    }

    #[test]
    fn unsubscribe_stops_new_markers_only() {
        let mut h = Harness::new(TrailConfig::web());
        h.extend([
            Step::pointer(at(0), 0.0, 0.0),
            Step::Unsubscribe { at: at(5) },
            Step::pointer(at(6), 1.0, 1.0),
            Step::pointer(at(7), 2.0, 2.0),
        ]);

        h.run_until(at(50), &mut Tracer::none());
        assert_eq!(h.snapshot().live, vec![MarkerId(0)]);
        assert_eq!(h.emitter().stats().ignored, 2);

        h.run_until(at(200), &mut Tracer::none());
        assert!(h.snapshot().live.is_empty(), "pending removal still ran");
        assert_eq!(h.remaining(), 0);
    }

    #[test]
    fn dense_stream_peaks_at_one_lifetime_of_moves() {
        let mut h = Harness::new(TrailConfig::web());
        // One move per millisecond for half a second.
        h.extend((0..500).map(|ms| Step::pointer(at(ms), ms as f64, 0.0)));

        h.run_until(at(1_000), &mut Tracer::none());
        let stats = h.emitter().stats();
        assert_eq!(stats.inserted, 500);
        assert_eq!(stats.removed, 500);
        assert_eq!(stats.peak_live, 100, "one marker per ms over a 100ms lifetime");
        assert_eq!(h.emitter().surface().stray_removals(), 0);
    }

    #[test]
    fn clock_reaches_target_without_events() {
        let mut h = Harness::new(TrailConfig::web());
        assert_eq!(h.run_until(at(42), &mut Tracer::none()), 0);
        assert_eq!(h.now(), at(42));
        assert!(h.snapshots().is_empty());
    }
}
