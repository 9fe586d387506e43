//! Fatal analysis errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Categories of input access failures for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessErrorKind {
    NotFound,
    PermissionDenied,
    Other,
}

impl AccessErrorKind {
    /// Get a user-friendly message for this error kind
    pub fn user_message(&self) -> &'static str {
        match self {
            AccessErrorKind::NotFound => "file not found",
            AccessErrorKind::PermissionDenied => "permission denied",
            AccessErrorKind::Other => "read failed",
        }
    }
}

/// Categorize an IO error raised while opening or reading the input
pub fn categorize_io_error(e: &io::Error) -> AccessErrorKind {
    match e.kind() {
        io::ErrorKind::NotFound => AccessErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => AccessErrorKind::PermissionDenied,
        _ => {
            #[cfg(unix)]
            {
                // EACCES
                if e.raw_os_error() == Some(13) {
                    return AccessErrorKind::PermissionDenied;
                }
            }
            AccessErrorKind::Other
        }
    }
}

/// Errors that abort an analysis run
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot read {}: {}", .path.display(), categorize_io_error(.source).user_message())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AnalysisError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AnalysisError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Category of the underlying failure
    pub fn kind(&self) -> AccessErrorKind {
        match self {
            AnalysisError::FileAccess { source, .. } => categorize_io_error(source),
        }
    }
}
