// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated pointer drag that exercises the tracing and diagnostics pipeline.
//!
//! Replays a scripted drag through a [`Harness`] in virtual time, recording
//! events to both a [`PrettyPrintSink`] and a [`RecorderSink`], then exports a
//! Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use trail_core::config::TrailConfig;
use trail_core::time::{HostTime, Timebase};
use trail_core::trace::{
    InsertFailedEvent, MarkerInsertedEvent, MarkerRemovedEvent, NotificationIgnoredEvent,
    SubscriptionEvent, TraceSink, Tracer,
};
use trail_harness::{Harness, Step};

use trail_debug::pretty::PrettyPrintSink;
use trail_debug::recorder::RecorderSink;

const MOVE_COUNT: u64 = 40;
/// Pointer event spacing in microseconds (≈60 Hz).
const MOVE_INTERVAL_US: u64 = 16_667;
/// Listener is dropped partway through the drag.
const UNSUBSCRIBE_AFTER: u64 = 30;

/// Forwards every event to a pretty printer and a recorder.
struct Tee<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Tee<'_> {
    fn on_subscription(&mut self, e: &SubscriptionEvent) {
        self.pretty.on_subscription(e);
        self.recorder.on_subscription(e);
    }

    fn on_marker_inserted(&mut self, e: &MarkerInsertedEvent) {
        self.pretty.on_marker_inserted(e);
        self.recorder.on_marker_inserted(e);
    }

    fn on_marker_removed(&mut self, e: &MarkerRemovedEvent) {
        self.pretty.on_marker_removed(e);
        self.recorder.on_marker_removed(e);
    }

    fn on_notification_ignored(&mut self, e: &NotificationIgnoredEvent) {
        self.pretty.on_notification_ignored(e);
        self.recorder.on_notification_ignored(e);
    }

    fn on_insert_failed(&mut self, e: &InsertFailedEvent) {
        self.pretty.on_insert_failed(e);
        self.recorder.on_insert_failed(e);
    }
}

fn main() {
    let timebase = Timebase::MICROS;

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::with_writer(
        Box::new(std::io::stdout()) as Box<dyn std::io::Write>,
        timebase,
    );
    let mut recorder = RecorderSink::new();

    // -- script ------------------------------------------------------------
    let mut harness = Harness::new(TrailConfig::web());
    for i in 0..MOVE_COUNT {
        let at = HostTime(i * MOVE_INTERVAL_US);
        // A diagonal drag with a little wobble.
        let x = 40.0 + 12.0 * i as f64;
        let y = 60.0 + 8.0 * i as f64 + if i % 2 == 0 { 0.5 } else { -0.5 };
        harness.push(Step::pointer(at, x, y));
    }
    harness.push(Step::Unsubscribe {
        at: HostTime(UNSUBSCRIBE_AFTER * MOVE_INTERVAL_US - 1),
    });

    // -- replay ------------------------------------------------------------
    let end = HostTime(MOVE_COUNT * MOVE_INTERVAL_US) + TrailConfig::web().lifetime;
    let removed = {
        let mut tee = Tee {
            pretty: &mut pretty,
            recorder: &mut recorder,
        };
        harness.run_until(end, &mut Tracer::new(&mut tee))
    };

    let stats = harness.emitter().stats();
    println!(
        "{} inserted, {removed} removed, {} ignored, peak {} live",
        stats.inserted, stats.ignored, stats.peak_live,
    );
    assert_eq!(harness.emitter().live_count(), 0, "every marker was removed");

    // -- export Chrome trace -----------------------------------------------
    let path = "trail-trace.json";
    let file = File::create(path).expect("failed to create trail-trace.json");
    let mut writer = BufWriter::new(file);
    trail_debug::chrome::export(recorder.as_bytes(), timebase, &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path}");
}
