//! Subscriber setup for the diagnostics side channel
//!
//! Diagnostics are written either to stderr, keeping stdout free for the
//! report, or to a timestamped file under the logs directory.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub(super) const LOG_FILE_PREFIX: &str = "logtally-";
pub(super) const LOG_FILE_SUFFIX: &str = ".log";

/// Where diagnostics are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// A new timestamped file inside this directory
    Directory(PathBuf),
}

/// Generate a timestamped diagnostic file path
pub fn create_log_file_path(logs_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    logs_dir.join(format!("{}{}{}", LOG_FILE_PREFIX, timestamp, LOG_FILE_SUFFIX))
}

/// Writer that appends to the shared diagnostic file
struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for SharedFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.file.lock() {
            Ok(mut file) => file.write(buf),
            Err(_) => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.lock() {
            Ok(mut file) => file.flush(),
            Err(_) => Ok(()),
        }
    }
}

/// Writer factory for tracing-subscriber
struct SharedFileWriterMaker {
    file: Arc<Mutex<File>>,
}

impl<'a> MakeWriter<'a> for SharedFileWriterMaker {
    type Writer = SharedFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileWriter {
            file: Arc::clone(&self.file),
        }
    }
}

/// Guard that keeps the diagnostic file open
pub struct LoggingGuard {
    /// Path of the diagnostic file, if logging to a file
    pub path: Option<PathBuf>,
    _file: Option<Arc<Mutex<File>>>,
}

/// Initialize the global diagnostics subscriber
///
/// `default_filter` applies when `RUST_LOG` is unset. The returned guard must
/// be kept alive for as long as diagnostics are emitted.
pub fn init_logging(target: LogTarget, default_filter: &str) -> Result<LoggingGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match target {
        LogTarget::Stderr => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer)
                .try_init()
                .context("Failed to initialize logging")?;

            Ok(LoggingGuard {
                path: None,
                _file: None,
            })
        }
        LogTarget::Directory(logs_dir) => {
            fs::create_dir_all(&logs_dir).context("Failed to create logs directory")?;

            let log_path = create_log_file_path(&logs_dir);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .context("Failed to open log file")?;
            let file = Arc::new(Mutex::new(file));

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(SharedFileWriterMaker {
                    file: Arc::clone(&file),
                })
                .with_ansi(false)
                .with_target(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer)
                .try_init()
                .context("Failed to initialize logging")?;

            Ok(LoggingGuard {
                path: Some(log_path),
                _file: Some(file),
            })
        }
    }
}
