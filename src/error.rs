//! Error types for Bookshelf
//!
//! Provides a unified error type for all store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using BookshelfError
pub type Result<T> = std::result::Result<T, BookshelfError>;

/// Unified error type for Bookshelf operations
#[derive(Debug, Error)]
pub enum BookshelfError {
    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("A record with id {0} already exists")]
    DuplicateId(i32),

    #[error("No record with id {0}")]
    NotFound(i32),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The rewritten temp file could not replace the live file.
    /// The live file is left as it was.
    #[error("Failed to replace {}: {source}", path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for BookshelfError {
    fn from(err: bincode::Error) -> Self {
        match *err {
            bincode::ErrorKind::Io(io) => BookshelfError::Io(io),
            other => BookshelfError::Serialization(other.to_string()),
        }
    }
}
