// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records: a one-byte tag followed by
//! the event's fields. Positions are stored as raw `f64` bits. [`decode`]
//! reads them back as an iterator of [`RecordedEvent`], stopping at the first
//! truncated or unknown record.

use kurbo::Point;

use trail_core::marker::MarkerId;
use trail_core::time::HostTime;
use trail_core::trace::{
    InsertFailedEvent, MarkerInsertedEvent, MarkerRemovedEvent, NotificationIgnoredEvent,
    SubscriptionEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SUBSCRIPTION: u8 = 1;
const TAG_MARKER_INSERTED: u8 = 2;
const TAG_MARKER_REMOVED: u8 = 3;
const TAG_NOTIFICATION_IGNORED: u8 = 4;
const TAG_INSERT_FAILED: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_point(&mut self, p: Point) {
        self.write_u64(p.x.to_bits());
        self.write_u64(p.y.to_bits());
    }
}

impl TraceSink for RecorderSink {
    fn on_subscription(&mut self, e: &SubscriptionEvent) {
        self.write_u8(TAG_SUBSCRIPTION);
        self.write_u64(e.at.ticks());
        self.write_u8(u8::from(e.subscribed));
    }

    fn on_marker_inserted(&mut self, e: &MarkerInsertedEvent) {
        self.write_u8(TAG_MARKER_INSERTED);
        self.write_u64(e.marker.0);
        self.write_point(e.position);
        self.write_u64(e.at.ticks());
        self.write_u64(e.due.ticks());
    }

    fn on_marker_removed(&mut self, e: &MarkerRemovedEvent) {
        self.write_u8(TAG_MARKER_REMOVED);
        self.write_u64(e.marker.0);
        self.write_u64(e.inserted_at.ticks());
        self.write_u64(e.due.ticks());
        self.write_u64(e.at.ticks());
    }

    fn on_notification_ignored(&mut self, e: &NotificationIgnoredEvent) {
        self.write_u8(TAG_NOTIFICATION_IGNORED);
        self.write_point(e.position);
        self.write_u64(e.at.ticks());
    }

    fn on_insert_failed(&mut self, e: &InsertFailedEvent) {
        self.write_u8(TAG_INSERT_FAILED);
        self.write_u64(e.marker.0);
        self.write_u64(e.at.ticks());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`SubscriptionEvent`].
    Subscription(SubscriptionEvent),
    /// A [`MarkerInsertedEvent`].
    MarkerInserted(MarkerInsertedEvent),
    /// A [`MarkerRemovedEvent`].
    MarkerRemoved(MarkerRemovedEvent),
    /// A [`NotificationIgnoredEvent`].
    NotificationIgnored(NotificationIgnoredEvent),
    /// An [`InsertFailedEvent`].
    InsertFailed(InsertFailedEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn read_u8(&mut self) -> Option<u8> {
        let v = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        let bytes = self.data.get(self.pos..self.pos + 8)?;
        self.pos += 8;
        Some(u64::from_le_bytes(bytes.try_into().ok()?))
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn read_marker(&mut self) -> Option<MarkerId> {
        self.read_u64().map(MarkerId)
    }

    fn read_point(&mut self) -> Option<Point> {
        let x = f64::from_bits(self.read_u64()?);
        let y = f64::from_bits(self.read_u64()?);
        Some(Point::new(x, y))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let event = match self.read_u8()? {
            TAG_SUBSCRIPTION => RecordedEvent::Subscription(SubscriptionEvent {
                at: self.read_time()?,
                subscribed: self.read_u8()? != 0,
            }),
            TAG_MARKER_INSERTED => RecordedEvent::MarkerInserted(MarkerInsertedEvent {
                marker: self.read_marker()?,
                position: self.read_point()?,
                at: self.read_time()?,
                due: self.read_time()?,
            }),
            TAG_MARKER_REMOVED => RecordedEvent::MarkerRemoved(MarkerRemovedEvent {
                marker: self.read_marker()?,
                inserted_at: self.read_time()?,
                due: self.read_time()?,
                at: self.read_time()?,
            }),
            TAG_NOTIFICATION_IGNORED => {
                RecordedEvent::NotificationIgnored(NotificationIgnoredEvent {
                    position: self.read_point()?,
                    at: self.read_time()?,
                })
            }
            TAG_INSERT_FAILED => RecordedEvent::InsertFailed(InsertFailedEvent {
                marker: self.read_marker()?,
                at: self.read_time()?,
            }),
            _ => return None,
        };
        Some(event)
    }
}
