//! Pruning of old diagnostic files
//!
//! Each run that logs to a file leaves one `logtally-<timestamp>.log` behind;
//! runs with file logging enabled remove the ones past the retention window.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::Result;

use super::file_writer::{LOG_FILE_PREFIX, LOG_FILE_SUFFIX};

/// Days a diagnostic file is kept when the config does not say otherwise
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Remove `logtally-*.log` files in `logs_dir` last modified more than
/// `retention_days` ago
///
/// Analyzed input files never match the name pattern, even when they sit in
/// the same directory. A missing directory counts as nothing to remove.
/// Returns the number of files deleted.
pub fn cleanup_old_logs(logs_dir: &Path, retention_days: u64) -> Result<usize> {
    if !logs_dir.exists() {
        return Ok(0);
    }

    let retention = Duration::from_secs(retention_days.saturating_mul(24 * 60 * 60));
    let cutoff = SystemTime::now()
        .checked_sub(retention)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut deleted = 0;
    for entry in fs::read_dir(logs_dir)? {
        let entry = entry?;
        let path = entry.path();

        let is_ours = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| {
                name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX)
            });
        if !is_ours {
            continue;
        }

        let modified = entry.metadata().and_then(|m| m.modified());
        if let Ok(modified) = modified {
            if modified < cutoff && fs::remove_file(&path).is_ok() {
                deleted += 1;
            }
        }
    }

    Ok(deleted)
}
