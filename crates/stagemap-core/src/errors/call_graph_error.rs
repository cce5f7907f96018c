//! Call graph errors.

use super::error_code::{self, ErrorCode};

/// Errors that can occur during call graph queries and snapshot handling.
#[derive(Debug, thiserror::Error)]
pub enum CallGraphError {
    /// The queried entity id is not part of the graph.
    #[error("Entity not found: {id}")]
    EntityNotFound { id: String },

    #[error("Invalid snapshot: {message}")]
    InvalidSnapshot { message: String },

    #[error("Snapshot version {found} is not supported (expected {expected})")]
    SnapshotVersion { found: u32, expected: u32 },
}

impl CallGraphError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::EntityNotFound { id: id.into() }
    }
}

impl ErrorCode for CallGraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EntityNotFound { .. } => error_code::ENTITY_NOT_FOUND,
            Self::InvalidSnapshot { .. } | Self::SnapshotVersion { .. } => {
                error_code::SNAPSHOT_ERROR
            }
        }
    }
}
