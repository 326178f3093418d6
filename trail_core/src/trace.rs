// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the marker lifecycle.
//!
//! This module provides a [`TraceSink`] trait with one method per lifecycle
//! event the emitter produces. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.

use kurbo::Point;

use crate::marker::MarkerId;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the emitter subscribes to or unsubscribes from pointer moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionEvent {
    /// Host time of the change.
    pub at: HostTime,
    /// `true` for subscribe, `false` for unsubscribe.
    pub subscribed: bool,
}

/// Emitted after a marker is appended to the render root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerInsertedEvent {
    /// The new marker.
    pub marker: MarkerId,
    /// Pointer position it was created at.
    pub position: Point,
    /// Host time of insertion.
    pub at: HostTime,
    /// When its removal task is due.
    pub due: HostTime,
}

/// Emitted after a marker's removal task runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerRemovedEvent {
    /// The removed marker.
    pub marker: MarkerId,
    /// Host time the marker was inserted.
    pub inserted_at: HostTime,
    /// When the removal task was due.
    pub due: HostTime,
    /// Host time the removal actually ran.
    pub at: HostTime,
}

/// Emitted when a notification arrives while the emitter is unsubscribed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NotificationIgnoredEvent {
    /// Pointer position of the ignored notification.
    pub position: Point,
    /// Host time it arrived.
    pub at: HostTime,
}

/// Emitted when the surface fails to create or append a marker's node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertFailedEvent {
    /// The marker id that was consumed by the failed attempt.
    pub marker: MarkerId,
    /// Host time of the attempt.
    pub at: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the emitter.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the subscription starts or stops.
    fn on_subscription(&mut self, e: &SubscriptionEvent) {
        _ = e;
    }

    /// Called after a marker is inserted.
    fn on_marker_inserted(&mut self, e: &MarkerInsertedEvent) {
        _ = e;
    }

    /// Called after a marker is removed.
    fn on_marker_removed(&mut self, e: &MarkerRemovedEvent) {
        _ = e;
    }

    /// Called when a notification is dropped because nothing is subscribed.
    fn on_notification_ignored(&mut self, e: &NotificationIgnoredEvent) {
        _ = e;
    }

    /// Called when the surface rejects an insert.
    fn on_insert_failed(&mut self, e: &InsertFailedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SubscriptionEvent`].
    #[inline]
    pub fn subscription(&mut self, e: &SubscriptionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_subscription(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MarkerInsertedEvent`].
    #[inline]
    pub fn marker_inserted(&mut self, e: &MarkerInsertedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_marker_inserted(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MarkerRemovedEvent`].
    #[inline]
    pub fn marker_removed(&mut self, e: &MarkerRemovedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_marker_removed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NotificationIgnoredEvent`].
    #[inline]
    pub fn notification_ignored(&mut self, e: &NotificationIgnoredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_notification_ignored(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`InsertFailedEvent`].
    #[inline]
    pub fn insert_failed(&mut self, e: &InsertFailedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_insert_failed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_insert() -> MarkerInsertedEvent {
        MarkerInsertedEvent {
            marker: MarkerId(0),
            position: Point::new(50.0, 80.0),
            at: HostTime(0),
            due: HostTime(100_000),
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_subscription(&SubscriptionEvent {
            at: HostTime(0),
            subscribed: true,
        });
        sink.on_marker_inserted(&sample_insert());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.marker_inserted(&sample_insert());
        tracer.insert_failed(&InsertFailedEvent {
            marker: MarkerId(1),
            at: HostTime(0),
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            inserted: Vec<MarkerId>,
        }
        impl TraceSink for RecordingSink {
            fn on_marker_inserted(&mut self, e: &MarkerInsertedEvent) {
                self.inserted.push(e.marker);
            }
        }

        let mut sink = RecordingSink {
            inserted: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.marker_inserted(&sample_insert());
        drop(tracer);
        assert_eq!(sink.inserted, &[MarkerId(0)]);
    }
}
