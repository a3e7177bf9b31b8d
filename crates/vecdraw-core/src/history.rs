//! Undo/redo history of shape-sequence snapshots.

use crate::store::{ShapeStore, Snapshot};
use std::collections::VecDeque;

/// Default maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 100;

/// Two stacks of full snapshots: `past` holds older states, `future` holds
/// undone states.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_UNDO_HISTORY)
    }
}

impl History {
    /// Create an empty history keeping at most `max_depth` undo states.
    /// A depth of zero disables the cap.
    pub fn new(max_depth: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            max_depth,
        }
    }

    /// Record the current state of `store` before a change.
    pub fn snapshot_before_change(&mut self, store: &ShapeStore) {
        self.push(store.snapshot());
    }

    /// Push a snapshot taken earlier (e.g. at the start of a gesture).
    /// Any mutation that is not an undo or redo invalidates the redo stack.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);
        self.future.clear();

        if self.max_depth > 0 && self.past.len() > self.max_depth {
            self.past.pop_front();
        }
        log::debug!("History push, {} undo states", self.past.len());
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, store: &mut ShapeStore) -> bool {
        let Some(snapshot) = self.past.pop_back() else {
            return false;
        };
        self.future.push(store.snapshot());
        store.restore(snapshot);
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, store: &mut ShapeStore) -> bool {
        let Some(snapshot) = self.future.pop() else {
            return false;
        };
        self.past.push_back(store.snapshot());
        store.restore(snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Frame, Rectangle, Shape, ShapeStyle};

    fn rect(x: i32) -> Shape {
        Shape::Rectangle(Rectangle::new(
            Frame::new(x, 0, 10, 10),
            ShapeStyle::new("#000000", "none", 1),
        ))
    }

    #[test]
    fn test_undo_add_shape() {
        let mut store = ShapeStore::new();
        let mut history = History::default();

        history.snapshot_before_change(&store);
        store.add(rect(0));
        assert_eq!(store.len(), 1);

        assert!(history.undo(&mut store));
        assert!(store.is_empty());
        assert!(history.can_redo());

        assert!(history.redo(&mut store));
        assert_eq!(store.len(), 1);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_clears_selection() {
        let mut store = ShapeStore::new();
        let mut history = History::default();
        store.add(rect(0));
        history.snapshot_before_change(&store);
        store.add(rect(20));
        assert!(store.selected_id().is_some());
        history.undo(&mut store);
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn test_new_change_clears_redo() {
        let mut store = ShapeStore::new();
        let mut history = History::default();
        history.snapshot_before_change(&store);
        store.add(rect(0));
        history.undo(&mut store);
        assert!(history.can_redo());
        history.snapshot_before_change(&store);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut store = ShapeStore::new();
        let mut history = History::default();
        store.add(rect(0));
        assert!(!history.undo(&mut store));
        assert!(!history.redo(&mut store));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_depth_cap_drops_oldest() {
        let mut store = ShapeStore::new();
        let mut history = History::new(3);
        for i in 0..5 {
            history.snapshot_before_change(&store);
            store.add(rect(i));
        }
        assert_eq!(history.undo_depth(), 3);
        while history.undo(&mut store) {}
        // The two oldest states are gone.
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_zero_depth_is_unbounded() {
        let mut store = ShapeStore::new();
        let mut history = History::new(0);
        for i in 0..250 {
            history.snapshot_before_change(&store);
            store.add(rect(i));
        }
        assert_eq!(history.undo_depth(), 250);
    }

    #[test]
    fn test_undo_redo_inverse() {
        let mut store = ShapeStore::new();
        let mut history = History::default();
        for i in 0..4 {
            history.snapshot_before_change(&store);
            store.add(rect(i * 10));
        }
        let before: Vec<Shape> = store.shapes().iter().map(|s| (**s).clone()).collect();
        history.undo(&mut store);
        history.redo(&mut store);
        let after: Vec<Shape> = store.shapes().iter().map(|s| (**s).clone()).collect();
        assert_eq!(before, after);
    }
}
