//! Bounded snapshot history for undo.

use crate::shapes::Element;
use std::collections::VecDeque;

/// Maximum number of undo states kept per canvas.
pub const HISTORY_LIMIT: usize = 20;

/// A stack of element-list snapshots, each captured before a mutation.
///
/// Once more than `capacity` snapshots are held the oldest is dropped.
/// Popped snapshots are discarded; there is no redo.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Vec<Element>>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty history holding up to [`HISTORY_LIMIT`] snapshots.
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_LIMIT)
    }

    /// Create an empty history with a custom depth.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// Push a copy of `elements` (call before making changes).
    pub fn push(&mut self, elements: &[Element]) {
        self.snapshots.push_back(elements.to_vec());
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
    }

    /// Pop the most recent snapshot.
    pub fn pop(&mut self) -> Option<Vec<Element>> {
        self.snapshots.pop_back()
    }

    /// Number of snapshots currently held.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
