//! logtally - severity counts and recent-error tracking for log files
//!
//! Lines of the form `[<timestamp>] <LEVEL> <message>` are parsed, counted per
//! severity, and the most recent ERROR records are kept in a bounded ring.
//!
//! ```
//! use logtally::{analyze_lines, Aggregator};
//!
//! let mut agg = Aggregator::default();
//! analyze_lines(["[2024-08-23 14:35:23] ERROR Disk failure on node3"], &mut agg);
//! assert_eq!(agg.counts().error, 1);
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod ring;

pub use aggregate::{Aggregator, LevelCounts, MEMORY_KEYWORD};
pub use error::AnalysisError;
pub use parser::{parse_line, ParseError};
pub use pipeline::{analyze_file, analyze_lines, analyze_reader, PassStats};
pub use record::{Level, LogRecord};
pub use report::Report;
pub use ring::{RecentErrors, MAX_RECENT_ERRORS};
