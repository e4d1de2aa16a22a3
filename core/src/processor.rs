//! Per-file processing orchestration.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::cleaner;
use crate::config::JanitorConfig;
use crate::error::{JanitorError, Result};
use crate::sheet;

/// What happened to one file.
///
/// Produced exactly once per file; the janitor never retries.
#[derive(Debug)]
pub enum ProcessingOutcome {
    /// Cleaned copy written, original archived.
    Success(PathBuf),

    /// File does not qualify; nothing was touched.
    Skipped(String),

    /// Processing failed; the file stays in the inbox for inspection.
    Failed(JanitorError),
}

impl ProcessingOutcome {
    /// Whether the file was fully processed.
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingOutcome::Success(_))
    }
}

/// Runs one file through load → clean → save → archive.
///
/// Owns all side effects of the pipeline. Failures are contained to the
/// file at hand: they are logged, surfaced in the outcome, and never abort
/// processing of other files.
#[derive(Debug, Clone)]
pub struct FileProcessor {
    config: JanitorConfig,
}

impl FileProcessor {
    /// Create a processor for the given configuration.
    pub fn new(config: JanitorConfig) -> Self {
        Self { config }
    }

    /// Process a single file.
    ///
    /// A non-qualifying extension skips without side effects. On success
    /// the cleaned copy lands in `limpio/` and the original is moved to
    /// `crudo/`. If the final move fails the cleaned copy is deliberately
    /// left in place.
    pub fn process(&self, path: &Path) -> ProcessingOutcome {
        if !self.config.qualifies(path) {
            debug!(path = %path.display(), "skipping file with non-qualifying extension");
            return ProcessingOutcome::Skipped("wrong extension".to_string());
        }

        info!(path = %path.display(), "new file detected");

        match self.run(path) {
            Ok(cleaned_path) => {
                info!(
                    cleaned = %cleaned_path.display(),
                    archived = %self.config.archive_path(path).display(),
                    "file processed"
                );
                ProcessingOutcome::Success(cleaned_path)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to process file");
                ProcessingOutcome::Failed(e)
            }
        }
    }

    fn run(&self, path: &Path) -> Result<PathBuf> {
        let table = sheet::load(path)?;
        let cleaned = cleaner::clean(table)?;

        let cleaned_path = self.config.cleaned_path(path);
        sheet::save(&cleaned, &cleaned_path)?;

        self.archive(path)?;
        Ok(cleaned_path)
    }

    /// Move the original into `crudo/`, overwriting any previous archive of
    /// the same name. Falls back to copy-and-remove when rename fails
    /// (cross-device inboxes).
    fn archive(&self, path: &Path) -> Result<()> {
        let dest = self.config.archive_path(path);

        if std::fs::rename(path, &dest).is_ok() {
            return Ok(());
        }

        std::fs::copy(path, &dest)
            .and_then(|_| std::fs::remove_file(path))
            .map_err(|source| JanitorError::Move {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(())
    }
}
