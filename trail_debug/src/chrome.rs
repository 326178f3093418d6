// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Marker lifetimes overlap, so each one is an async span (`"b"`/`"e"` with the
//! marker id as span id) rather than a nested duration event.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use trail_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Subscription(e) => {
                let name = if e.subscribed {
                    "Subscribe"
                } else {
                    "Unsubscribe"
                };
                events.push(json!({
                    "ph": "i",
                    "name": name,
                    "cat": "Listener",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                }));
            }
            RecordedEvent::MarkerInserted(e) => {
                events.push(json!({
                    "ph": "b",
                    "name": "Marker",
                    "cat": "Trail",
                    "id": e.marker.0,
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "x": e.position.x,
                        "y": e.position.y,
                        "due_us": ticks_to_us(e.due.ticks(), timebase),
                    }
                }));
            }
            RecordedEvent::MarkerRemoved(e) => {
                events.push(json!({
                    "ph": "e",
                    "name": "Marker",
                    "cat": "Trail",
                    "id": e.marker.0,
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "late_us": ticks_to_us(e.at.saturating_duration_since(e.due).ticks(), timebase),
                    }
                }));
            }
            RecordedEvent::NotificationIgnored(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Ignored",
                    "cat": "Listener",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "x": e.position.x,
                        "y": e.position.y,
                    }
                }));
            }
            RecordedEvent::InsertFailed(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "InsertFailed",
                    "cat": "Trail",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "marker": e.marker.0,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use trail_core::config::TrailConfig;
    use trail_core::time::HostTime;
    use trail_core::trace::Tracer;
    use trail_harness::{Harness, Step};

    fn export_json(bytes: &[u8]) -> Vec<Value> {
        let mut out = Vec::new();
        export(bytes, Timebase::MICROS, &mut out).unwrap();
        serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap()
    }

    #[test]
    fn burst_exports_one_span_per_marker() {
        let mut rec = RecorderSink::new();
        let mut h = Harness::new(TrailConfig::web());
        h.extend([
            Step::pointer(HostTime(0), 1.0, 1.0),
            Step::pointer(HostTime(10_000), 2.0, 2.0),
            Step::Unsubscribe {
                at: HostTime(15_000),
            },
            Step::pointer(HostTime(20_000), 3.0, 3.0),
        ]);
        h.run_until(HostTime(200_000), &mut Tracer::new(&mut rec));

        let parsed = export_json(rec.as_bytes());
        let phases: Vec<_> = parsed.iter().map(|e| e["ph"].as_str().unwrap()).collect();
        assert_eq!(phases, ["b", "b", "i", "i", "e", "e"]);

        assert_eq!(parsed[0]["id"], 0);
        assert_eq!(parsed[0]["ts"], 0.0);
        assert_eq!(parsed[2]["name"], "Unsubscribe");
        assert_eq!(parsed[3]["name"], "Ignored");
        assert_eq!(parsed[4]["id"], 0);
        assert_eq!(parsed[4]["ts"], 100_000.0);
        assert_eq!(parsed[5]["id"], 1);
        assert_eq!(parsed[5]["ts"], 110_000.0);
        assert_eq!(parsed[5]["args"]["late_us"], 0.0);
    }

    #[test]
    fn export_empty_recording() {
        assert!(export_json(&[]).is_empty());
    }
}
