// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pending one-shot removal tasks.
//!
//! Every inserted marker gets exactly one [`RemovalTask`], which carries the
//! marker's id, the surface node to remove and the delay it was scheduled
//! with. [`RemovalQueue`] keeps pending tasks ordered by `(due, marker)`, so
//! tasks with identical delays drain in creation order and a harness can
//! enumerate them or fast-forward through them deterministically.
//!
//! A task leaves the queue exactly once, either through
//! [`pop_due`](RemovalQueue::pop_due) or [`take`](RemovalQueue::take). There
//! is no cancellation path.

use alloc::collections::BTreeMap;
use core::fmt;

use crate::marker::MarkerId;
use crate::time::{Duration, HostTime};

/// A scheduled removal of one marker.
pub struct RemovalTask<N> {
    /// The marker this task removes.
    pub marker: MarkerId,
    /// The surface node backing the marker.
    pub node: N,
    /// When the marker was inserted and the task scheduled.
    pub scheduled_at: HostTime,
    /// Delay from `scheduled_at` until the task is due.
    pub delay: Duration,
}

impl<N> RemovalTask<N> {
    /// Returns the earliest time this task may run.
    #[inline]
    #[must_use]
    pub fn due(&self) -> HostTime {
        self.scheduled_at.saturating_add(self.delay)
    }
}

impl<N> fmt::Debug for RemovalTask<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemovalTask")
            .field("marker", &self.marker)
            .field("scheduled_at", &self.scheduled_at)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// Pending removal tasks ordered by due time, then marker id.
///
/// A second index from marker to due time keeps lookups by marker
/// logarithmic, so per-marker timers stay cheap however many markers are live.
pub struct RemovalQueue<N> {
    tasks: BTreeMap<(HostTime, MarkerId), RemovalTask<N>>,
    due_by_marker: BTreeMap<MarkerId, HostTime>,
}

impl<N> Default for RemovalQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for RemovalQueue<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tasks.values()).finish()
    }
}

impl<N> RemovalQueue<N> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            due_by_marker: BTreeMap::new(),
        }
    }

    /// Adds a task.
    ///
    /// Marker ids are unique per emitter, so a second task for the same marker
    /// is a caller bug.
    pub fn schedule(&mut self, task: RemovalTask<N>) {
        debug_assert!(
            !self.contains(task.marker),
            "marker {:?} already has a pending removal",
            task.marker
        );
        let due = task.due();
        self.due_by_marker.insert(task.marker, due);
        self.tasks.insert((due, task.marker), task);
    }

    /// Number of pending tasks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if nothing is pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterates pending tasks in the order they will run.
    pub fn iter(&self) -> impl Iterator<Item = &RemovalTask<N>> {
        self.tasks.values()
    }

    /// Due time of the next task, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<HostTime> {
        self.tasks.keys().next().map(|&(due, _)| due)
    }

    /// Returns `true` if `marker` still has a pending task.
    #[must_use]
    pub fn contains(&self, marker: MarkerId) -> bool {
        self.due_by_marker.contains_key(&marker)
    }

    /// Removes and returns the earliest task if it is due at `now`.
    pub fn pop_due(&mut self, now: HostTime) -> Option<RemovalTask<N>> {
        let entry = self.tasks.first_entry()?;
        let (due, marker) = *entry.key();
        if due > now {
            return None;
        }
        self.due_by_marker.remove(&marker);
        Some(entry.remove())
    }

    /// Removes and returns the task for `marker`, regardless of its due time.
    pub fn take(&mut self, marker: MarkerId) -> Option<RemovalTask<N>> {
        let due = self.due_by_marker.remove(&marker)?;
        self.tasks.remove(&(due, marker))
    }
}
