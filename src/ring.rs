//! Bounded buffer of the most recent error records
//!
//! Fixed-capacity circular buffer: once full, each insert overwrites the
//! oldest slot and advances the head, so eviction is O(1).

use crate::record::LogRecord;

/// Default number of error records retained
pub const MAX_RECENT_ERRORS: usize = 100;

/// Ring of the last `capacity` error records, in arrival order
#[derive(Debug, Clone)]
pub struct RecentErrors {
    /// Backing slots; grows to `capacity` and then stays that size
    slots: Vec<LogRecord>,
    /// Index of the oldest record once the buffer has wrapped
    head: usize,
    capacity: usize,
    /// Lifetime insert count, evicted records included
    total_inserted: u64,
}

impl Default for RecentErrors {
    fn default() -> Self {
        Self::new(MAX_RECENT_ERRORS)
    }
}

impl RecentErrors {
    /// Create an empty ring holding at most `capacity` records
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
            total_inserted: 0,
        }
    }

    /// Append a record, evicting the oldest one when full
    pub fn insert(&mut self, record: LogRecord) {
        self.total_inserted += 1;
        if self.capacity == 0 {
            return;
        }

        if self.slots.len() < self.capacity {
            self.slots.push(record);
        } else {
            self.slots[self.head] = record;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Iterate held records, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    /// Copy of the held records, oldest first
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of records ever inserted, including evicted ones
    pub fn total_inserted(&self) -> u64 {
        self.total_inserted
    }
}
