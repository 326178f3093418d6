// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! printed in milliseconds using a [`Timebase`].

use std::io::Write;

use trail_core::time::{HostTime, Timebase};
use trail_core::trace::{
    InsertFailedEvent, MarkerInsertedEvent, MarkerRemovedEvent, NotificationIgnoredEvent,
    SubscriptionEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ms(&self, t: HostTime) -> f64 {
        t.as_millis_f64(self.timebase)
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_subscription(&mut self, e: &SubscriptionEvent) {
        let what = if e.subscribed { "subscribe" } else { "unsubscribe" };
        let _ = writeln!(self.writer, "[{what}] at {:.3}ms", self.ms(e.at));
    }

    fn on_marker_inserted(&mut self, e: &MarkerInsertedEvent) {
        let _ = writeln!(
            self.writer,
            "[insert] marker={} at {:.3}ms pos=({}, {}) due={:.3}ms",
            e.marker.0,
            self.ms(e.at),
            e.position.x,
            e.position.y,
            self.ms(e.due),
        );
    }

    fn on_marker_removed(&mut self, e: &MarkerRemovedEvent) {
        let lived = e.at.saturating_duration_since(e.inserted_at);
        let _ = writeln!(
            self.writer,
            "[remove] marker={} at {:.3}ms lived={:.3}ms",
            e.marker.0,
            self.ms(e.at),
            lived.as_millis_f64(self.timebase),
        );
    }

    fn on_notification_ignored(&mut self, e: &NotificationIgnoredEvent) {
        let _ = writeln!(
            self.writer,
            "[ignored] at {:.3}ms pos=({}, {})",
            self.ms(e.at),
            e.position.x,
            e.position.y,
        );
    }

    fn on_insert_failed(&mut self, e: &InsertFailedEvent) {
        let _ = writeln!(
            self.writer,
            "[insert:FAILED] marker={} at {:.3}ms",
            e.marker.0,
            self.ms(e.at),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use trail_core::marker::MarkerId;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn pretty_print_insert() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MICROS);
        sink.on_marker_inserted(&MarkerInsertedEvent {
            marker: MarkerId(4),
            position: Point::new(50.0, 80.0),
            at: HostTime(0),
            due: HostTime(100_000),
        });
        let out = output(sink);
        assert!(out.contains("[insert]"), "got: {out}");
        assert!(out.contains("marker=4"), "got: {out}");
        assert!(out.contains("pos=(50, 80)"), "got: {out}");
        assert!(out.contains("due=100.000ms"), "got: {out}");
    }

    #[test]
    fn pretty_print_remove_reports_lifetime() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MICROS);
        sink.on_marker_removed(&MarkerRemovedEvent {
            marker: MarkerId(1),
            inserted_at: HostTime(10_000),
            due: HostTime(110_000),
            at: HostTime(112_500),
        });
        let out = output(sink);
        assert!(out.contains("lived=102.500ms"), "got: {out}");
    }

    #[test]
    fn pretty_print_subscription() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MICROS);
        sink.on_subscription(&SubscriptionEvent {
            at: HostTime(0),
            subscribed: false,
        });
        assert!(output(sink).starts_with("[unsubscribe]"));
    }
}
