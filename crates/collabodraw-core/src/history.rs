//! Snapshot-based undo/redo over the element store.

use crate::elements::Element;
use crate::store::ElementStore;
use crate::time::now_millis;
use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// A full copy of the element sequence at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub elements: Vec<Element>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl HistoryEntry {
    fn capture(store: &ElementStore) -> Self {
        Self {
            elements: store.snapshot(),
            timestamp: now_millis(),
        }
    }
}

/// Linear undo/redo history.
///
/// The top of the undo stack always mirrors the current store contents, so
/// undo needs at least two entries: the current one moves to the redo stack
/// and the one below it is restored.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
}

impl History {
    /// Create a history seeded with the store's current state.
    pub fn new(store: &ElementStore) -> Self {
        let mut history = Self::default();
        history.reset(store);
        history
    }

    /// Record the store's current state after a mutation.
    pub fn commit(&mut self, store: &ElementStore) {
        self.undo_stack.push_back(HistoryEntry::capture(store));
        self.redo_stack.clear();

        while self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.pop_front();
        }
    }

    /// Step back one entry. Returns false if there is nothing to undo.
    pub fn undo(&mut self, store: &mut ElementStore) -> bool {
        if !self.can_undo() {
            return false;
        }
        let Some(current) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push(current);
        if let Some(previous) = self.undo_stack.back() {
            store.replace_all(previous.elements.clone());
        }
        true
    }

    /// Re-apply the last undone entry. Returns false if there is nothing to redo.
    pub fn redo(&mut self, store: &mut ElementStore) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };
        store.replace_all(entry.elements.clone());
        self.undo_stack.push_back(entry);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop both stacks and seed a single baseline entry.
    pub fn reset(&mut self, store: &ElementStore) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_stack.push_back(HistoryEntry::capture(store));
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Most recent entry (mirrors the current state).
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.undo_stack.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{HexColor, Line};
    use kurbo::Point;

    fn line(i: usize) -> Element {
        let x = i as f64;
        Element::Line(Line::new(Point::new(x, 0.0), Point::new(x, 10.0), HexColor::black()))
    }

    #[test]
    fn test_baseline_cannot_be_undone() {
        let mut store = ElementStore::new();
        let mut history = History::new(&store);
        assert!(!history.can_undo());
        assert!(!history.undo(&mut store));
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut store = ElementStore::new();
        let mut history = History::new(&store);
        for i in 0..3 {
            store.append(line(i));
            history.commit(&store);
        }
        let before = store.snapshot();

        assert!(history.undo(&mut store));
        assert_eq!(store.len(), 2);
        assert!(history.redo(&mut store));
        assert_eq!(store.snapshot(), before);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_are_not_commits() {
        let mut store = ElementStore::new();
        let mut history = History::new(&store);
        store.append(line(0));
        history.commit(&store);
        let len = history.undo_len();
        history.undo(&mut store);
        history.redo(&mut store);
        assert_eq!(history.undo_len(), len);
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut store = ElementStore::new();
        let mut history = History::new(&store);
        store.append(line(0));
        history.commit(&store);
        history.undo(&mut store);
        assert!(history.can_redo());
        store.append(line(1));
        history.commit(&store);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut store = ElementStore::new();
        let mut history = History::new(&store);
        for i in 0..(MAX_UNDO_HISTORY * 2) {
            store.append(line(i));
            history.commit(&store);
            assert!(history.undo_len() <= MAX_UNDO_HISTORY);
        }
        assert_eq!(history.undo_len(), MAX_UNDO_HISTORY);

        // Oldest entries are gone: only 49 undos possible
        let mut undos = 0;
        while history.undo(&mut store) {
            undos += 1;
        }
        assert_eq!(undos, MAX_UNDO_HISTORY - 1);
        assert_eq!(store.len(), MAX_UNDO_HISTORY * 2 - (MAX_UNDO_HISTORY - 1));
    }

    #[test]
    fn test_reset() {
        let mut store = ElementStore::new();
        let mut history = History::new(&store);
        store.append(line(0));
        history.commit(&store);
        history.undo(&mut store);
        history.reset(&store);
        assert_eq!(history.undo_len(), 1);
        assert!(!history.can_redo());
    }
}
