//! Plain-text analysis report

use std::fmt;
use std::io::{self, Write};

use crate::aggregate::Aggregator;

/// Renders the final counters and recent errors of an aggregator
pub struct Report<'a> {
    aggregator: &'a Aggregator,
    /// Whether to list the held error records after the counts
    show_recent: bool,
}

impl<'a> Report<'a> {
    pub fn new(aggregator: &'a Aggregator) -> Self {
        Self {
            aggregator,
            show_recent: true,
        }
    }

    /// Counts only, without the recent-errors listing
    pub fn counts_only(mut self) -> Self {
        self.show_recent = false;
        self
    }

    /// Write the report to `out`
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self)?;
        out.flush()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.aggregator.counts();
        writeln!(f, "Log Level Counts:")?;
        writeln!(f, "INFO: {}", counts.info)?;
        writeln!(f, "WARN: {}", counts.warn)?;
        writeln!(f, "ERROR: {}", counts.error)?;
        writeln!(f, "Memory Warnings: {}", counts.memory_warnings)?;

        if self.show_recent {
            let recent = self.aggregator.recent_errors();
            writeln!(f, "Recent {} Errors:", recent.capacity())?;
            for record in recent.iter() {
                writeln!(f, "{}", record)?;
            }
        }
        Ok(())
    }
}
