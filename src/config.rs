//! Configuration management for logtally

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::DEFAULT_RETENTION_DAYS;
use crate::ring::MAX_RECENT_ERRORS;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Number of most recent ERROR records kept for the report (default: 100)
    #[serde(default = "default_recent_errors_capacity")]
    pub recent_errors_capacity: usize,

    /// Diagnostic filter directive, used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Write diagnostics to ~/.logtally/logs instead of stderr
    #[serde(default)]
    pub log_to_file: bool,

    /// Diagnostic log retention in days (default: 7)
    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u64,
}

fn default_recent_errors_capacity() -> usize {
    MAX_RECENT_ERRORS
}

fn default_log_filter() -> String {
    "logtally=info".to_string()
}

fn default_log_retention_days() -> u64 {
    DEFAULT_RETENTION_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recent_errors_capacity: default_recent_errors_capacity(),
            log_filter: default_log_filter(),
            log_to_file: false,
            log_retention_days: default_log_retention_days(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, or return defaults if not found
    pub fn load() -> Result<Self> {
        let path = config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the analyzer cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.recent_errors_capacity == 0 {
            anyhow::bail!("recent_errors_capacity must be at least 1");
        }
        Ok(())
    }
}

/// Get the base configuration directory (~/.logtally)
/// Falls back to ./.logtally if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".logtally"))
        .unwrap_or_else(|| PathBuf::from(".logtally"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the path to the diagnostic logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}
