//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors that can occur while discovering source files.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The analysis root is missing or is not a readable directory. This is
    /// the only fatal condition of a run.
    #[error("Root path is not a readable directory: {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid ignore pattern {pattern:?}: {message}")]
    InvalidIgnorePattern { pattern: String, message: String },
}

impl ErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RootUnreadable { .. } => error_code::ROOT_UNREADABLE,
            _ => error_code::SCAN_ERROR,
        }
    }
}
