//! Top-level error for the end-to-end analysis entry point.

use super::error_code::ErrorCode;
use super::{CallGraphError, ConfigError, ParseError, ScanError};

/// Any failure that aborts a whole analysis run.
///
/// Per-file `ParseError`s do not abort a run; they only surface here when a
/// caller parses a single file directly.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    CallGraph(#[from] CallGraphError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::CallGraph(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
