// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and emitter for pointer-following marker trails.
//!
//! `trail_core` turns a stream of pointer-move notifications into a stream of
//! short-lived markers. Each notification inserts exactly one marker into a
//! render root and schedules exactly one removal of that marker after a fixed
//! lifetime. It is `no_std` compatible (with `alloc`) and contains no platform
//! code; hosts plug in through the [`Surface`](surface::Surface) trait.
//!
//! # Architecture
//!
//! ```text
//!   Host (pointer listener)
//!       │ PointerMove
//!       ▼
//!   TrailEmitter::notify() ──► Surface::insert() ──► render root gains a node
//!       │
//!       ▼
//!   RemovalQueue::schedule(RemovalTask { marker, node, delay })
//!       │
//!       │  host timer / virtual clock
//!       ▼
//!   TrailEmitter::advance() or fire() ──► Surface::remove(node)
//! ```
//!
//! **[`emitter`]**: The lifecycle object: explicit subscribe/unsubscribe,
//! notification handling and removal dispatch.
//!
//! **[`queue`]**: Pending one-shot removal tasks, each carrying one marker
//! reference and one delay, enumerable in due order.
//!
//! **[`surface`]**: The [`Surface`](surface::Surface) trait that backends
//! implement, plus [`MemorySurface`](surface::MemorySurface) for harnesses
//! and tests.
//!
//! **[`marker`]**: Marker identity, attributes and CSS pixel formatting.
//!
//! **[`pointer`]**: The host's pointer-move record.
//!
//! **[`config`]**: Fixed marker content and lifetime presets.
//!
//! **[`time`]**: Monotonic host time, durations and timebase conversion.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! marker lifecycle instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod emitter;
pub mod marker;
pub mod pointer;
pub mod queue;
pub mod surface;
pub mod time;
pub mod trace;
