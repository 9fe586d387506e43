//! Diagnostics for logtally
//!
//! Diagnostics (skipped lines, run summaries) go through `tracing` to stderr
//! by default, or to a timestamped file with age-based retention.

mod file_writer;
mod retention;

pub use file_writer::{create_log_file_path, init_logging, LogTarget, LoggingGuard};
pub use retention::{cleanup_old_logs, DEFAULT_RETENTION_DAYS};
