//! Configuration for the janitor pipeline.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The single spreadsheet extension the janitor handles.
///
/// Matching is byte-exact: `report.XLSX` does not qualify, matching the
/// original tool's behavior.
pub const QUALIFYING_EXTENSION: &str = "xlsx";

/// Name of the cleaned-outputs subdirectory.
pub const CLEAN_DIR: &str = "limpio";

/// Name of the archived-originals subdirectory.
pub const RAW_DIR: &str = "crudo";

/// Suffix appended to the stem of every cleaned output file.
pub const CLEAN_SUFFIX: &str = "_limpio";

/// Configuration for a janitor run.
///
/// Built once at startup and shared read-only by every component; there is
/// no global mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JanitorConfig {
    /// Inbox directory; also the parent of `limpio/` and `crudo/`.
    pub base_dir: PathBuf,

    /// How long to wait after a creation event before reading the file,
    /// so the writer has finished flushing it.
    pub settle_delay: Duration,

    /// Capacity of the file-event channel between the filesystem watcher
    /// and the consumer loop.
    pub channel_capacity: usize,
}

impl JanitorConfig {
    /// Create a config rooted at the given inbox directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            settle_delay: Duration::from_secs(1),
            channel_capacity: 1000,
        }
    }

    /// Set the settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the event channel capacity.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// The inbox directory.
    pub fn inbox(&self) -> &Path {
        &self.base_dir
    }

    /// Directory for cleaned outputs.
    pub fn clean_dir(&self) -> PathBuf {
        self.base_dir.join(CLEAN_DIR)
    }

    /// Directory for archived originals.
    pub fn raw_dir(&self) -> PathBuf {
        self.base_dir.join(RAW_DIR)
    }

    /// Whether a path has the qualifying spreadsheet extension.
    pub fn qualifies(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == QUALIFYING_EXTENSION)
    }

    /// Destination path for the cleaned copy of `path`.
    ///
    /// `<base>/limpio/<stem>_limpio.<ext>`.
    pub fn cleaned_path(&self, path: &Path) -> PathBuf {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(QUALIFYING_EXTENSION);
        self.clean_dir().join(format!("{stem}{CLEAN_SUFFIX}.{ext}"))
    }

    /// Destination path for the archived original of `path`.
    pub fn archive_path(&self, path: &Path) -> PathBuf {
        let name = path.file_name().unwrap_or_default();
        self.raw_dir().join(name)
    }

    /// Create the inbox, `limpio/` and `crudo/` directories if absent.
    ///
    /// Failure here is a startup abort, not a per-file error.
    pub fn ensure_layout(&self) -> Result<()> {
        std::fs::create_dir_all(self.inbox())?;
        std::fs::create_dir_all(self.clean_dir())?;
        std::fs::create_dir_all(self.raw_dir())?;
        Ok(())
    }
}
