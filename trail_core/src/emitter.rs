// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The trail emitter.
//!
//! [`TrailEmitter`] converts pointer-move notifications into transient
//! markers. It owns a [`Surface`] and a [`RemovalQueue`], and has an explicit
//! subscription lifecycle: notifications delivered while unsubscribed create
//! nothing.
//!
//! # Lifecycle of one marker
//!
//! ```text
//!   notify(move, now)
//!       ├─ Marker::new(id, config, move)
//!       ├─ surface.insert(&marker)          ──► Inserted
//!       └─ queue.schedule(RemovalTask { marker, node, now, lifetime })
//!
//!   advance(now) / fire(marker, now)
//!       └─ surface.remove(&task.node)       ──► Removed (terminal)
//! ```
//!
//! Insertion always completes before the removal task exists, so a marker's
//! insertion happens-before its removal. Unsubscribing stops new markers but
//! leaves pending removals in place; every inserted marker is still removed
//! exactly once.
//!
//! No cap is placed on the number of live markers. A dense notification
//! stream grows the render root until removals catch up;
//! [`TrailStats::peak_live`] records how far it grew.

use crate::config::TrailConfig;
use crate::marker::{Marker, MarkerId, MarkerState};
use crate::pointer::PointerMove;
use crate::queue::{RemovalQueue, RemovalTask};
use crate::surface::Surface;
use crate::time::HostTime;
use crate::trace::{
    InsertFailedEvent, MarkerInsertedEvent, MarkerRemovedEvent, NotificationIgnoredEvent,
    SubscriptionEvent, Tracer,
};

/// Counters describing everything an emitter has done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrailStats {
    /// Markers inserted into the surface.
    pub inserted: u64,
    /// Markers removed from the surface.
    pub removed: u64,
    /// Notifications dropped while unsubscribed.
    pub ignored: u64,
    /// Inserts rejected by the surface.
    pub failed: u64,
    /// Largest number of markers live at once.
    pub peak_live: usize,
}

/// Turns pointer-move notifications into self-removing markers.
pub struct TrailEmitter<S: Surface> {
    surface: S,
    config: TrailConfig,
    subscribed: bool,
    next_id: u64,
    pending: RemovalQueue<S::Node>,
    stats: TrailStats,
}

impl<S: Surface + core::fmt::Debug> core::fmt::Debug for TrailEmitter<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrailEmitter")
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("subscribed", &self.subscribed)
            .field("next_id", &self.next_id)
            .field("pending", &self.pending.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<S: Surface> TrailEmitter<S> {
    /// Creates an emitter that is **not yet subscribed**.
    #[must_use]
    pub fn new(surface: S, config: TrailConfig) -> Self {
        Self {
            surface,
            config,
            subscribed: false,
            next_id: 0,
            pending: RemovalQueue::new(),
            stats: TrailStats::default(),
        }
    }

    /// Starts accepting notifications.
    ///
    /// If already subscribed, this is a no-op.
    pub fn subscribe(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        if self.subscribed {
            return;
        }
        self.subscribed = true;
        tracer.subscription(&SubscriptionEvent {
            at: now,
            subscribed: true,
        });
    }

    /// Stops accepting notifications.
    ///
    /// Pending removals are kept and still run. If not subscribed, this is a
    /// no-op.
    pub fn unsubscribe(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        if !self.subscribed {
            return;
        }
        self.subscribed = false;
        tracer.subscription(&SubscriptionEvent {
            at: now,
            subscribed: false,
        });
    }

    /// Returns `true` while notifications create markers.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Handles one pointer-move notification.
    ///
    /// While subscribed, inserts exactly one marker and schedules exactly one
    /// removal for it, returning the new id. While unsubscribed, returns
    /// `Ok(None)` and changes nothing but the `ignored` counter.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the marker's node could not be
    /// inserted. The marker id is consumed and no removal is scheduled.
    pub fn notify(
        &mut self,
        event: &PointerMove,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Result<Option<MarkerId>, S::Error> {
        if !self.subscribed {
            self.stats.ignored += 1;
            tracer.notification_ignored(&NotificationIgnoredEvent {
                position: event.position(),
                at: now,
            });
            return Ok(None);
        }

        let id = MarkerId(self.next_id);
        self.next_id += 1;
        let marker = Marker::new(id, &self.config, event);

        let node = match self.surface.insert(&marker) {
            Ok(node) => node,
            Err(err) => {
                self.stats.failed += 1;
                tracer.insert_failed(&InsertFailedEvent { marker: id, at: now });
                return Err(err);
            }
        };

        let task = RemovalTask {
            marker: id,
            node,
            scheduled_at: now,
            delay: self.config.lifetime,
        };
        let due = task.due();
        self.pending.schedule(task);

        self.stats.inserted += 1;
        self.stats.peak_live = self.stats.peak_live.max(self.pending.len());
        tracer.marker_inserted(&MarkerInsertedEvent {
            marker: id,
            position: marker.position,
            at: now,
            due,
        });

        Ok(Some(id))
    }

    /// Runs every removal task due at `now`, earliest first.
    ///
    /// Returns the number of markers removed.
    pub fn advance(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> usize {
        let mut removed = 0;
        while let Some(task) = self.pending.pop_due(now) {
            self.run(task, now, tracer);
            removed += 1;
        }
        removed
    }

    /// Runs the removal task for `marker` now, whatever its due time.
    ///
    /// This is the entry point for hosts that arm one real timer per task: the
    /// timer itself guarantees the delay has elapsed. Returns `false` if the
    /// marker has no pending task (already removed, or never inserted).
    pub fn fire(&mut self, marker: MarkerId, now: HostTime, tracer: &mut Tracer<'_>) -> bool {
        match self.pending.take(marker) {
            Some(task) => {
                self.run(task, now, tracer);
                true
            }
            None => false,
        }
    }

    fn run(&mut self, task: RemovalTask<S::Node>, now: HostTime, tracer: &mut Tracer<'_>) {
        self.surface.remove(&task.node);
        self.stats.removed += 1;
        tracer.marker_removed(&MarkerRemovedEvent {
            marker: task.marker,
            inserted_at: task.scheduled_at,
            due: task.due(),
            at: now,
        });
    }

    /// Due time of the next pending removal, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<HostTime> {
        self.pending.next_due()
    }

    /// Pending removal tasks in the order they will run.
    pub fn pending(&self) -> impl Iterator<Item = &RemovalTask<S::Node>> {
        self.pending.iter()
    }

    /// Number of markers currently in the render root.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.pending.len()
    }

    /// Lifecycle state of `marker`, or `None` if this emitter never created it.
    ///
    /// A marker whose insert failed reports `Removed`: it never entered the
    /// render root and never will.
    #[must_use]
    pub fn state(&self, marker: MarkerId) -> Option<MarkerState> {
        if marker.0 >= self.next_id {
            None
        } else if self.pending.contains(marker) {
            Some(MarkerState::Inserted)
        } else {
            Some(MarkerState::Removed)
        }
    }

    /// Lifetime counters.
    #[must_use]
    pub fn stats(&self) -> TrailStats {
        self.stats
    }

    /// The emitter's fixed config.
    #[must_use]
    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// The render root.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use crate::time::Duration;
    use alloc::vec::Vec;

    const LIFETIME: Duration = Duration(100);

    fn emitter() -> TrailEmitter<MemorySurface> {
        let config = TrailConfig::new("../assets/kenya-flag.png", "trail", LIFETIME);
        let mut e = TrailEmitter::new(MemorySurface::new(), config);
        e.subscribe(HostTime(0), &mut Tracer::none());
        e
    }

    fn notify(e: &mut TrailEmitter<MemorySurface>, x: f64, y: f64, at: u64) -> MarkerId {
        let Ok(id) = e.notify(&PointerMove::new(x, y), HostTime(at), &mut Tracer::none());
        id.expect("subscribed emitter creates a marker")
    }

    #[test]
    fn single_notification_inserts_then_removes() {
        let mut e = emitter();
        let before = e.surface().len();

        let id = notify(&mut e, 50.0, 80.0, 0);
        let child = e.surface().last().expect("one child appended");
        assert_eq!(child.id, id);
        assert_eq!(child.left, "50px");
        assert_eq!(child.top, "80px");
        assert_eq!(child.class, "trail");
        assert!(child.source.ends_with("kenya-flag.png"));
        assert_eq!(e.surface().len(), before + 1);

        assert_eq!(e.advance(HostTime(99), &mut Tracer::none()), 0, "too early");
        assert!(e.surface().contains(id));

        assert_eq!(e.advance(HostTime(100), &mut Tracer::none()), 1);
        assert!(!e.surface().contains(id));
        assert_eq!(e.surface().len(), before, "child count restored");
        assert_eq!(e.state(id), Some(MarkerState::Removed));
    }

    #[test]
    fn burst_removes_in_creation_order() {
        let mut e = emitter();
        let a = notify(&mut e, 1.0, 1.0, 0);
        let b = notify(&mut e, 2.0, 2.0, 10);
        let c = notify(&mut e, 3.0, 3.0, 20);
        assert_ne!(a, b);
        assert_ne!(b, c);

        e.advance(HostTime(100), &mut Tracer::none());
        assert!(!e.surface().contains(a));
        assert!(e.surface().contains(b) && e.surface().contains(c));

        e.advance(HostTime(110), &mut Tracer::none());
        assert!(!e.surface().contains(b));
        assert!(e.surface().contains(c));

        e.advance(HostTime(120), &mut Tracer::none());
        assert!(e.surface().is_empty());
        assert_eq!(e.stats().peak_live, 3);
    }

    #[test]
    fn identical_markers_are_removed_independently() {
        let mut e = emitter();
        let a = notify(&mut e, 7.0, 7.0, 0);
        let b = notify(&mut e, 7.0, 7.0, 0);
        assert_ne!(a, b, "same coordinates and instant still yield distinct markers");

        assert!(e.fire(b, HostTime(100), &mut Tracer::none()));
        let survivor = e.surface().get(a).expect("a untouched");
        assert_eq!(survivor.left, "7px");
        assert_eq!(e.state(a), Some(MarkerState::Inserted));
    }

    #[test]
    fn each_marker_is_removed_exactly_once() {
        let mut e = emitter();
        let ids: Vec<_> = (0..5).map(|i| notify(&mut e, 0.0, 0.0, i)).collect();

        e.advance(HostTime(1_000), &mut Tracer::none());
        for &id in &ids {
            assert!(!e.fire(id, HostTime(1_001), &mut Tracer::none()), "no second run");
        }
        assert_eq!(e.advance(HostTime(2_000), &mut Tracer::none()), 0);
        assert_eq!(e.surface().inserted(), 5);
        assert_eq!(e.surface().removed(), 5);
        assert_eq!(e.surface().stray_removals(), 0);
        assert_eq!(e.stats().removed, 5);
    }

    #[test]
    fn removed_marker_is_never_reinserted() {
        let mut e = emitter();
        let a = notify(&mut e, 1.0, 2.0, 0);
        e.advance(HostTime(100), &mut Tracer::none());
        let b = notify(&mut e, 1.0, 2.0, 150);

        assert_ne!(a, b, "a new notification makes a new marker");
        assert!(!e.surface().contains(a));
        assert_eq!(e.state(a), Some(MarkerState::Removed));
    }

    #[test]
    fn unsubscribed_emitter_creates_nothing() {
        let mut e = emitter();
        let a = notify(&mut e, 1.0, 1.0, 0);
        e.unsubscribe(HostTime(5), &mut Tracer::none());
        assert!(!e.is_subscribed());

        let r = e.notify(&PointerMove::new(9.0, 9.0), HostTime(6), &mut Tracer::none());
        assert_eq!(r, Ok(None));
        assert_eq!(e.surface().len(), 1);
        assert_eq!(e.stats().ignored, 1);

        // The pending removal still runs after unsubscribing.
        e.advance(HostTime(100), &mut Tracer::none());
        assert!(!e.surface().contains(a));

        e.subscribe(HostTime(200), &mut Tracer::none());
        assert!(notify(&mut e, 3.0, 3.0, 200) > a);
    }

    #[test]
    fn content_is_fixed_regardless_of_coordinates() {
        let mut e = emitter();
        for (i, (x, y)) in [(0.0, 0.0), (-5.5, 1e6), (123.25, 4.0)].into_iter().enumerate() {
            notify(&mut e, x, y, i as u64);
        }
        assert!(
            e.surface()
                .children()
                .all(|m| m.source == "../assets/kenya-flag.png" && m.class == "trail")
        );
    }

    #[test]
    fn pending_tasks_enumerate_in_due_order() {
        let mut e = emitter();
        notify(&mut e, 0.0, 0.0, 30);
        notify(&mut e, 0.0, 0.0, 40);

        let due: Vec<_> = e.pending().map(|t| (t.marker, t.due())).collect();
        assert_eq!(
            due,
            [(MarkerId(0), HostTime(130)), (MarkerId(1), HostTime(140))]
        );
        assert_eq!(e.next_due(), Some(HostTime(130)));
        assert_eq!(e.state(MarkerId(2)), None, "never created");
    }

    #[test]
    fn failed_insert_schedules_nothing() {
        #[derive(Debug)]
        struct Rejecting;
        impl Surface for Rejecting {
            type Node = ();
            type Error = &'static str;
            fn insert(&mut self, _: &Marker) -> Result<(), &'static str> {
                Err("no document")
            }
            fn remove(&mut self, _: &()) {}
        }

        let mut e = TrailEmitter::new(Rejecting, TrailConfig::web());
        e.subscribe(HostTime(0), &mut Tracer::none());
        let r = e.notify(&PointerMove::new(1.0, 1.0), HostTime(0), &mut Tracer::none());
        assert_eq!(r, Err("no document"));
        assert_eq!(e.live_count(), 0);
        assert_eq!(e.stats().failed, 1);
        assert_eq!(e.state(MarkerId(0)), Some(MarkerState::Removed));
    }
}
