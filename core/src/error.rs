//! Error types for the data janitor.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for janitor operations.
pub type Result<T> = std::result::Result<T, JanitorError>;

/// Errors that can occur while processing spreadsheet files.
///
/// Every variant is scoped to a single file; none of them is fatal to the
/// process. A failed file stays in the inbox so a human can inspect it.
#[derive(Error, Debug)]
pub enum JanitorError {
    /// Input could not be interpreted as a rectangular table.
    #[error("structural error: {0}")]
    Structural(String),

    /// Spreadsheet could not be read.
    #[error("failed to load {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// Cleaned output could not be written.
    #[error("failed to save {path}: {message}")]
    Save { path: PathBuf, message: String },

    /// Original could not be moved into the archive.
    #[error("failed to archive {path}: {source}")]
    Move {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Filesystem watch error.
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
