//! File-creation events from the inbox watch.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file-creation event.
///
/// This is the whole capability the janitor requires from the underlying
/// change-notification mechanism: a path and whether it names a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEvent {
    /// Path of the created entry.
    pub path: PathBuf,

    /// Whether the entry is a directory.
    pub is_directory: bool,

    /// When the event was observed.
    pub timestamp: DateTime<Utc>,
}

impl FileEvent {
    /// Create an event for a path, probing the filesystem for its kind.
    pub fn created(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            is_directory: path.is_dir(),
            path,
            timestamp: Utc::now(),
        }
    }
}
