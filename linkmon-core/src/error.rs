//! Error types for linkmon.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for linkmon operations.
pub type Result<T> = std::result::Result<T, LinkmonError>;

/// Main error type for linkmon.
#[derive(Error, Debug)]
pub enum LinkmonError {
    // Record validation errors
    #[error("Invalid status record: missing {field}")]
    Validation { field: &'static str },

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage migration failed: {reason}")]
    MigrationFailed { reason: String },

    // Configuration errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // File system errors
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // API surface errors
    #[error("API error: {message}")]
    Api { message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
