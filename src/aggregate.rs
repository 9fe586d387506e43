//! Per-severity classification and counters

use crate::record::{Level, LogRecord};
use crate::ring::{RecentErrors, MAX_RECENT_ERRORS};

/// Substring that marks a warning as memory related (case-sensitive)
pub const MEMORY_KEYWORD: &str = "Memory";

/// Snapshot of the aggregate counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub info: u64,
    pub warn: u64,
    pub error: u64,
    /// WARN records whose message contains [`MEMORY_KEYWORD`]
    pub memory_warnings: u64,
    /// Parsed records with a tag outside INFO/WARN/ERROR
    pub unrecognized: u64,
}

impl LevelCounts {
    /// Total records classified, recognized or not
    pub fn total(&self) -> u64 {
        self.info + self.warn + self.error + self.unrecognized
    }
}

/// Consumes parsed records in arrival order and keeps the counters
/// plus the ring of recent errors
#[derive(Debug, Clone)]
pub struct Aggregator {
    counts: LevelCounts,
    recent_errors: RecentErrors,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(MAX_RECENT_ERRORS)
    }
}

impl Aggregator {
    /// Create an aggregator retaining up to `recent_capacity` error records
    pub fn new(recent_capacity: usize) -> Self {
        Self {
            counts: LevelCounts::default(),
            recent_errors: RecentErrors::new(recent_capacity),
        }
    }

    /// Classify one record, taking ownership of it
    pub fn classify(&mut self, record: LogRecord) {
        match record.level() {
            Level::Info => self.counts.info += 1,
            Level::Warn => {
                self.counts.warn += 1;
                if record.message().contains(MEMORY_KEYWORD) {
                    self.counts.memory_warnings += 1;
                }
            }
            Level::Error => {
                self.counts.error += 1;
                self.recent_errors.insert(record);
            }
            Level::Other(tag) => {
                tracing::trace!("Ignoring unrecognized level: {}", tag);
                self.counts.unrecognized += 1;
            }
        }
    }

    pub fn counts(&self) -> LevelCounts {
        self.counts
    }

    pub fn recent_errors(&self) -> &RecentErrors {
        &self.recent_errors
    }
}
