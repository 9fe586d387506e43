//! Parsed log records
//!
//! A `LogRecord` is the structured form of one `[<timestamp>] <LEVEL> <message>`
//! line. Records are only built by the parser and never change afterwards.

use std::fmt;

/// Severity tag carried by a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    /// Any tag outside the recognized set, preserved verbatim
    Other(String),
}

impl Level {
    /// Map a raw tag to a level (exact, case-sensitive match)
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "INFO" => Level::Info,
            "WARN" => Level::Warn,
            "ERROR" => Level::Error,
            other => Level::Other(other.to_string()),
        }
    }

    /// Get the tag as it appeared in the source line
    pub fn as_str(&self) -> &str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Other(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parsed log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    timestamp: String,
    level: Level,
    message: String,
}

impl LogRecord {
    pub(crate) fn new(timestamp: &str, level: &str, message: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            level: Level::from_tag(level),
            message: message.to_string(),
        }
    }

    /// Timestamp token, exactly as written between the brackets
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Everything after the level token
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.timestamp, self.level, self.message)
    }
}
