//! Bounded, debounced undo/redo history.
//!
//! Every structural change to a chart document is recorded here. Changes
//! arriving inside the coalescing window collapse into a single entry, deep
//! equality suppresses no-op entries, and the log is capped so long editing
//! sessions do not grow without bound.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum number of retained history entries.
pub const HISTORY_CAPACITY: usize = 100;

/// Coalescing window for rapid successive changes.
pub const HISTORY_DEBOUNCE: Duration = Duration::from_millis(500);

/// A bounded undo/redo log over snapshots of `T`.
#[derive(Debug)]
pub struct HistoryBuffer<T: Clone + PartialEq> {
    entries: VecDeque<T>,
    cursor: usize,
    capacity: usize,
    window: Duration,
    last_record: Option<Instant>,
}

impl<T: Clone + PartialEq> HistoryBuffer<T> {
    /// Creates a buffer seeded with the initial snapshot.
    pub fn new(initial: T) -> Self {
        Self::with_limits(initial, HISTORY_CAPACITY, HISTORY_DEBOUNCE)
    }

    /// Creates a buffer with explicit capacity and coalescing window.
    pub fn with_limits(initial: T, capacity: usize, window: Duration) -> Self {
        let mut entries = VecDeque::with_capacity(capacity.min(64));
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            capacity: capacity.max(1),
            window,
            last_record: None,
        }
    }

    /// Records a snapshot.
    ///
    /// Snapshots deep-equal to the current entry are dropped. A snapshot
    /// arriving inside the coalescing window replaces the entry opened by
    /// the previous record instead of appending a new one. Recording always
    /// discards any redo tail.
    pub fn record(&mut self, value: T) {
        self.record_at(value, Instant::now());
    }

    fn record_at(&mut self, value: T, now: Instant) {
        if self.entries[self.cursor] == value {
            return;
        }

        // Drop the redo tail
        self.entries.truncate(self.cursor + 1);

        let coalesce = self.cursor > 0
            && self
                .last_record
                .is_some_and(|last| now.duration_since(last) < self.window);
        if coalesce {
            self.entries[self.cursor] = value;
        } else {
            if self.entries.len() == self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back(value);
            self.cursor = self.entries.len() - 1;
        }
        self.last_record = Some(now);
    }

    /// Steps back one entry, returning the restored snapshot.
    pub fn undo(&mut self) -> Option<T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        // Break any open coalescing run
        self.last_record = None;
        Some(self.entries[self.cursor].clone())
    }

    /// Steps forward one entry, returning the restored snapshot.
    pub fn redo(&mut self) -> Option<T> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.last_record = None;
        Some(self.entries[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The current snapshot.
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    /// Number of retained entries (including the baseline).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        false // always holds at least the baseline
    }
}
