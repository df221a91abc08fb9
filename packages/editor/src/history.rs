//! # Undo/Redo History
//!
//! Linear history of whole-state snapshots with a movable cursor.
//!
//! ## Design
//!
//! - `entries[cursor]` is always the current state
//! - A significant record truncates everything after the cursor, appends,
//!   and moves the cursor to the new entry
//! - A non-significant record overwrites `entries[cursor]` (keystroke edits
//!   collapse into one entry) and also discards the redo tail
//! - Recording a significant state equal to the current one is a no-op
//! - Past `max_entries`, the oldest entries are dropped
//!
//! Snapshots of a `Project` are cheap to keep: forests share unchanged
//! subtrees by `Arc`, so consecutive entries mostly point at the same nodes.
//!
//! ## Example
//!
//! ```rust
//! use reportcraft_editor::HistoryManager;
//!
//! let mut history = HistoryManager::new("s0");
//! history.record("s1", true);
//! history.record("s2", true);
//!
//! assert_eq!(history.undo(), Some(&"s1"));
//! assert_eq!(history.undo(), Some(&"s0"));
//! assert_eq!(history.undo(), None);
//! assert_eq!(history.redo(), Some(&"s1"));
//! ```

/// Default number of retained snapshots
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// What `record` did with the new state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Pushed as a new undo step
    Appended,
    /// Overwrote the current entry
    Replaced,
    /// Equal to the current entry; nothing recorded
    Unchanged,
}

/// Bounded snapshot history with a cursor
#[derive(Debug, Clone)]
pub struct HistoryManager<T> {
    /// Recorded states, oldest first
    entries: Vec<T>,

    /// Index of the current state in `entries`
    cursor: usize,

    /// Maximum number of retained entries (at least 1)
    max_entries: usize,
}

impl<T: Clone + PartialEq> HistoryManager<T> {
    /// Create a history whose only entry is `initial`
    pub fn new(initial: T) -> Self {
        Self::with_max_entries(initial, DEFAULT_MAX_ENTRIES)
    }

    /// Create a history with a custom retention limit
    pub fn with_max_entries(initial: T, max_entries: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Record a new state
    pub fn record(&mut self, state: T, significant: bool) -> RecordOutcome {
        self.entries.truncate(self.cursor + 1);

        if !significant {
            self.entries[self.cursor] = state;
            return RecordOutcome::Replaced;
        }

        if self.entries[self.cursor] == state {
            return RecordOutcome::Unchanged;
        }

        self.entries.push(state);
        self.cursor = self.entries.len() - 1;

        // Trim if exceeded max entries
        if self.entries.len() > self.max_entries {
            let overflow = self.entries.len() - self.max_entries;
            self.entries.drain(..overflow);
            self.cursor -= overflow;
            tracing::debug!("history trimmed {} oldest entries", overflow);
        }

        RecordOutcome::Appended
    }

    /// Step back; returns the now-current state
    pub fn undo(&mut self) -> Option<&T> {
        if self.cursor == 0 {
            return None; // Nothing to undo
        }
        self.cursor -= 1;
        tracing::debug!("undo to history entry {}", self.cursor);
        self.entries.get(self.cursor)
    }

    /// Step forward; returns the now-current state
    pub fn redo(&mut self) -> Option<&T> {
        if self.cursor + 1 >= self.entries.len() {
            return None; // Nothing to redo
        }
        self.cursor += 1;
        tracing::debug!("redo to history entry {}", self.cursor);
        self.entries.get(self.cursor)
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Drop all history, keeping `state` as the single entry
    pub fn clear(&mut self, state: T) {
        self.entries.clear();
        self.entries.push(state);
        self.cursor = 0;
    }
}
