//! Parser errors.
//!
//! A `ParseError` is always scoped to one file. The pipeline records it,
//! skips the file, and keeps going.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors that can occur while reading or parsing one source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File too large: {path} ({size} bytes, max {max})")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Unsupported extension: {extension}")]
    UnsupportedExtension { extension: String },

    #[error("Failed to load grammar for {language}: {message}")]
    GrammarLoad { language: String, message: String },

    #[error("Tree-sitter error parsing {path}: {message}")]
    TreeSitterError { path: PathBuf, message: String },

    #[error("{count} syntax error(s) in {path}")]
    SyntaxErrors { path: PathBuf, count: usize },
}

impl ParseError {
    /// Path of the offending file, when the error is tied to one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. }
            | Self::FileTooLarge { path, .. }
            | Self::TreeSitterError { path, .. }
            | Self::SyntaxErrors { path, .. } => Some(path),
            Self::UnsupportedExtension { .. } | Self::GrammarLoad { .. } => None,
        }
    }
}

impl ErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedExtension { .. } => error_code::UNSUPPORTED_LANGUAGE,
            _ => error_code::PARSE_ERROR,
        }
    }
}
