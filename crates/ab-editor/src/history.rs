//! Undo/redo history of document snapshots.
//!
//! Each entry is a full copy of the state taken at a commit point (end of a
//! gesture, a property edit, a structural command). Undo and redo move a
//! cursor and hand back the snapshot to restore; there is no inverse
//! operation chain. The first entry is the baseline and can't be undone.

use std::collections::VecDeque;

pub struct History<T> {
    entries: VecDeque<T>,
    /// Index of the entry matching the live state.
    cursor: usize,
    capacity: usize,
    /// Set while a snapshot is being restored; `record` is ignored meanwhile.
    restoring: bool,
}

impl<T: Clone + PartialEq> History<T> {
    /// Start a history whose baseline is `initial`. `capacity` counts the
    /// baseline and is at least 1.
    pub fn new(capacity: usize, initial: T) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity);
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            capacity,
            restoring: false,
        }
    }

    /// Record a committed state. Future entries are dropped; the oldest entry
    /// is evicted once full. Returns `false` (and records nothing) while
    /// restoring or when `state` equals the current entry.
    pub fn record(&mut self, state: T) -> bool {
        if self.restoring {
            return false;
        }
        if self.entries.get(self.cursor) == Some(&state) {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(state);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
        log::debug!("history: recorded entry {} of {}", self.cursor + 1, self.entries.len());
        true
    }

    /// Step back. Returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        log::debug!("history: undo to entry {}", self.cursor + 1);
        self.entries.get(self.cursor).cloned()
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self) -> Option<T> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        log::debug!("history: redo to entry {}", self.cursor + 1);
        self.entries.get(self.cursor).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The snapshot matching the live state.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    /// Drop everything and start over from `state`.
    pub fn reset(&mut self, state: T) {
        self.entries.clear();
        self.entries.push_back(state);
        self.cursor = 0;
        self.restoring = false;
    }

    pub fn begin_restore(&mut self) {
        self.restoring = true;
    }

    pub fn end_restore(&mut self) {
        self.restoring = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_redo_walks_the_cursor() {
        let mut h = History::new(10, 0);
        assert!(h.record(1));
        assert!(h.record(2));
        assert_eq!(h.undo(), Some(1));
        assert_eq!(h.undo(), Some(0));
        assert_eq!(h.undo(), None);
        assert_eq!(h.redo(), Some(1));
        assert_eq!(h.redo(), Some(2));
        assert_eq!(h.redo(), None);
    }

    #[test]
    fn new_record_drops_redo_branch() {
        let mut h = History::new(10, 0);
        h.record(1);
        h.record(2);
        h.undo();
        assert!(h.can_redo());
        h.record(3);
        assert!(!h.can_redo());
        assert_eq!(h.undo(), Some(1));
    }

    #[test]
    fn identical_state_is_not_recorded() {
        let mut h = History::new(10, 0);
        assert!(!h.record(0));
        h.record(5);
        assert!(!h.record(5));
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut h = History::new(3, 0);
        for i in 1..=5 {
            h.record(i);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.undo(), Some(4));
        assert_eq!(h.undo(), Some(3));
        assert_eq!(h.undo(), None);
    }

    #[test]
    fn record_is_ignored_while_restoring() {
        let mut h = History::new(10, 0);
        h.record(1);
        h.begin_restore();
        assert!(!h.record(99));
        h.end_restore();
        assert_eq!(h.len(), 2);
        assert!(h.record(2));
    }

    #[test]
    fn reset_keeps_a_single_baseline() {
        let mut h = History::new(10, 0);
        h.record(1);
        h.record(2);
        h.reset(7);
        assert_eq!(h.len(), 1);
        assert_eq!(h.current(), Some(&7));
        assert!(!h.can_undo());
    }
}
