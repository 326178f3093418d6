// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-root contract for backends.
//!
//! A backend supplies a [`Surface`]: something that can append a node for a
//! [`Marker`] as the last child of its render root and later remove that
//! exact node. Removal is by node reference, never by position or class, so
//! overlapping markers are removed independently of each other.
//!
//! [`MemorySurface`] is an in-memory render root used by harnesses and tests.

use alloc::vec::Vec;
use core::convert::Infallible;

use crate::marker::{Marker, MarkerId};

/// A render root that markers are inserted into and removed from.
///
/// Both the DOM-based surface and [`MemorySurface`] implement this trait,
/// enabling the same emitter to drive a page or a test double.
pub trait Surface {
    /// Handle to a node created by [`insert`](Self::insert).
    type Node;

    /// Error raised when a node cannot be created or appended.
    type Error;

    /// Creates a node for `marker` and appends it as the last child of the
    /// render root.
    fn insert(&mut self, marker: &Marker) -> Result<Self::Node, Self::Error>;

    /// Removes `node` from the render root.
    fn remove(&mut self, node: &Self::Node);
}

/// Handle to a child of a [`MemorySurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(pub u64);

/// An ordered in-memory render root.
///
/// Children keep insertion order. Each insert gets a fresh [`NodeKey`], and
/// removing a key that is no longer present is counted in
/// [`stray_removals`](Self::stray_removals) instead of touching other
/// children.
#[derive(Debug, Default)]
pub struct MemorySurface {
    children: Vec<(NodeKey, Marker)>,
    next_key: u64,
    inserted: u64,
    removed: u64,
    stray_removals: u64,
}

impl MemorySurface {
    /// Creates an empty render root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current children, first inserted first.
    pub fn children(&self) -> impl Iterator<Item = &Marker> {
        self.children.iter().map(|(_, m)| m)
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the render root has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the child rendered for `marker`, if it is present.
    #[must_use]
    pub fn get(&self, marker: MarkerId) -> Option<&Marker> {
        self.children().find(|m| m.id == marker)
    }

    /// Returns `true` if a child for `marker` is present.
    #[must_use]
    pub fn contains(&self, marker: MarkerId) -> bool {
        self.get(marker).is_some()
    }

    /// The most recently appended child.
    #[must_use]
    pub fn last(&self) -> Option<&Marker> {
        self.children.last().map(|(_, m)| m)
    }

    /// Total nodes ever inserted.
    #[must_use]
    pub fn inserted(&self) -> u64 {
        self.inserted
    }

    /// Total nodes ever removed.
    #[must_use]
    pub fn removed(&self) -> u64 {
        self.removed
    }

    /// Removals that named a node which was not present.
    #[must_use]
    pub fn stray_removals(&self) -> u64 {
        self.stray_removals
    }
}

impl Surface for MemorySurface {
    type Node = NodeKey;
    type Error = Infallible;

    fn insert(&mut self, marker: &Marker) -> Result<NodeKey, Infallible> {
        let key = NodeKey(self.next_key);
        self.next_key += 1;
        self.children.push((key, marker.clone()));
        self.inserted += 1;
        Ok(key)
    }

    fn remove(&mut self, node: &NodeKey) {
        match self.children.iter().position(|(k, _)| k == node) {
            Some(pos) => {
                self.children.remove(pos);
                self.removed += 1;
            }
            None => self.stray_removals += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrailConfig;
    use crate::pointer::PointerMove;

    fn marker(id: u64, x: f64, y: f64) -> Marker {
        Marker::new(MarkerId(id), &TrailConfig::web(), &PointerMove::new(x, y))
    }

    #[test]
    fn insert_appends_as_last_child() {
        let mut surface = MemorySurface::new();
        let Ok(_) = surface.insert(&marker(0, 1.0, 1.0));
        let Ok(_) = surface.insert(&marker(1, 2.0, 2.0));

        assert_eq!(surface.len(), 2);
        assert_eq!(surface.last().map(|m| m.id), Some(MarkerId(1)));
    }

    #[test]
    fn remove_targets_the_node_not_the_position() {
        let mut surface = MemorySurface::new();
        // Same coordinates, same class: only the node key tells them apart.
        let Ok(a) = surface.insert(&marker(0, 5.0, 5.0));
        let Ok(b) = surface.insert(&marker(1, 5.0, 5.0));

        surface.remove(&b);
        assert!(surface.contains(MarkerId(0)));
        assert!(!surface.contains(MarkerId(1)));

        surface.remove(&a);
        assert!(surface.is_empty());
        assert_eq!(surface.removed(), 2);
        assert_eq!(surface.stray_removals(), 0);
    }

    #[test]
    fn removing_twice_is_counted_not_applied() {
        let mut surface = MemorySurface::new();
        let Ok(a) = surface.insert(&marker(0, 0.0, 0.0));
        let Ok(_) = surface.insert(&marker(1, 0.0, 0.0));

        surface.remove(&a);
        surface.remove(&a);
        assert_eq!(surface.len(), 1, "second removal must not touch siblings");
        assert_eq!(surface.stray_removals(), 1);
    }
}
