//! Bounded undo history of full-buffer snapshots.

use std::collections::VecDeque;

use super::buffer::Snapshot;

/// Default number of retained snapshots.
pub const DEFAULT_HISTORY_CAP: usize = 20;

/// Ordered snapshots, oldest first, capacity-bounded.
///
/// The stack is seeded with the blank-canvas baseline and always holds at
/// least one entry; after any committed operation the newest entry equals the
/// current buffer contents. Undo is a single-step pop with no redo cursor.
/// Once the cap is reached the oldest entry (eventually the blank baseline
/// itself) is evicted first.
pub struct HistoryStack {
    entries: VecDeque<Snapshot>,
    cap: usize,
}

impl HistoryStack {
    /// Creates a stack seeded with the baseline snapshot. A cap of zero is
    /// treated as one, preserving the at-least-one-entry invariant.
    pub fn new(baseline: Snapshot, cap: usize) -> Self {
        let cap = cap.max(1);
        let mut entries = VecDeque::with_capacity(cap);
        entries.push_back(baseline);
        Self { entries, cap }
    }

    /// Appends a committed snapshot, evicting the oldest entry past the cap.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.entries.push_back(snapshot);
        if self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    /// Removes the newest entry and returns the one to restore, or `None` at
    /// the single-entry floor.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.entries.len() > 1 {
            self.entries.pop_back();
            self.entries.back()
        } else {
            None
        }
    }

    /// Clears back to a single baseline entry (the "clear all" action).
    pub fn reset(&mut self, baseline: Snapshot) {
        self.entries.clear();
        self.entries.push_back(baseline);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}
