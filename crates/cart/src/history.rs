//! Cart memento history: append-only snapshots with a movable cursor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::CartItem;

/// Maximum number of retained mementos. Older snapshots are discarded once
/// the history grows past this.
pub const HISTORY_CAP: usize = 20;

/// An immutable deep snapshot of the cart at one point in time.
///
/// Owned exclusively by [`CartHistory`]; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartMemento {
    items: Vec<CartItem>,
    taken_at: DateTime<Utc>,
}

impl CartMemento {
    fn capture(items: &[CartItem], at: DateTime<Utc>) -> Self {
        Self {
            // Structural clone: the snapshot must not alias the live list.
            items: items.to_vec(),
            taken_at: at,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }
}

/// Ordered memento sequence plus a cursor into it.
///
/// Invariants:
/// - the cursor always indexes an existing memento;
/// - recording while the cursor is not at the end truncates the forward
///   branch first (standard undo-branch-discard semantics);
/// - at most [`HISTORY_CAP`] mementos are retained; overflow drops the
///   oldest entry and re-bases the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartHistory {
    mementos: Vec<CartMemento>,
    cursor: usize,
}

impl CartHistory {
    /// A fresh history seeded with one empty snapshot, so the very first
    /// mutation can be undone back to an empty cart.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            mementos: vec![CartMemento::capture(&[], at)],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.mementos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mementos.is_empty()
    }

    /// Current cursor position (index of the snapshot the cart reflects).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.mementos.len()
    }

    /// Record a new snapshot after a successful mutation.
    pub fn record(&mut self, items: &[CartItem], at: DateTime<Utc>) {
        // Discard any stale forward history before appending.
        self.mementos.truncate(self.cursor + 1);
        self.mementos.push(CartMemento::capture(items, at));
        if self.mementos.len() > HISTORY_CAP {
            self.mementos.remove(0);
        }
        self.cursor = self.mementos.len() - 1;
    }

    /// Step the cursor back and return the snapshot to restore, or `None`
    /// when already at the oldest retained state.
    pub fn undo(&mut self) -> Option<&CartMemento> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.mementos[self.cursor])
    }

    /// Step the cursor forward and return the snapshot to restore, or
    /// `None` when already at the newest state.
    pub fn redo(&mut self) -> Option<&CartMemento> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.mementos[self.cursor])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> CartHistory {
        CartHistory::new(Utc::now())
    }

    #[test]
    fn new_history_has_one_empty_snapshot_and_nothing_to_undo() {
        let h = history();
        assert_eq!(h.len(), 1);
        assert_eq!(h.cursor(), 0);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn record_advances_cursor_to_the_end() {
        let mut h = history();
        h.record(&[], Utc::now());
        h.record(&[], Utc::now());
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), 2);
        assert!(h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn undo_then_record_truncates_forward_branch() {
        let mut h = history();
        h.record(&[], Utc::now());
        h.record(&[], Utc::now());
        h.undo().unwrap();
        h.undo().unwrap();
        assert!(h.can_redo());

        h.record(&[], Utc::now());
        // The two undone snapshots are gone.
        assert_eq!(h.len(), 2);
        assert!(!h.can_redo());
        assert_eq!(h.cursor(), 1);
    }

    #[test]
    fn history_is_capped_and_cursor_rebased() {
        let mut h = history();
        for _ in 0..HISTORY_CAP + 5 {
            h.record(&[], Utc::now());
        }
        assert_eq!(h.len(), HISTORY_CAP);
        assert_eq!(h.cursor(), HISTORY_CAP - 1);
        // The seed snapshot has been discarded, but undo still walks the
        // full retained window.
        let mut undos = 0;
        while h.undo().is_some() {
            undos += 1;
        }
        assert_eq!(undos, HISTORY_CAP - 1);
    }

    #[test]
    fn undo_at_oldest_and_redo_at_newest_are_no_ops() {
        let mut h = history();
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
        assert_eq!(h.cursor(), 0);
    }
}
