//! Startup scan of the inbox.

use tracing::info;
use walkdir::WalkDir;

use crate::config::JanitorConfig;
use crate::error::Result;
use crate::processor::FileProcessor;

/// Result of the startup scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Qualifying files found in the inbox.
    pub found: usize,

    /// Files processed successfully.
    pub processed: usize,

    /// Files that produced a failure outcome.
    pub failed: usize,
}

impl ScanSummary {
    /// Whether at least one qualifying file was found.
    pub fn found_any(&self) -> bool {
        self.found > 0
    }
}

/// Feeds files already present in the inbox through the processor once.
///
/// Runs before the watch subscription so files that predate the process are
/// not missed; files created after the scan arrive as events instead.
pub struct BootstrapScanner<'a> {
    config: &'a JanitorConfig,
    processor: &'a FileProcessor,
}

impl<'a> BootstrapScanner<'a> {
    /// Create a scanner over the configured inbox.
    pub fn new(config: &'a JanitorConfig, processor: &'a FileProcessor) -> Self {
        Self { config, processor }
    }

    /// Enumerate the inbox (non-recursive, listing order) and process every
    /// qualifying file synchronously.
    ///
    /// Directories — including `limpio/` and `crudo/` — and files with other
    /// extensions are silently ignored, as are unreadable entries. An
    /// unreadable inbox root is a startup failure.
    pub fn scan(&self) -> Result<ScanSummary> {
        info!(inbox = %self.config.inbox().display(), "scanning inbox for existing files");

        // Surface a missing or unreadable inbox up front; WalkDir would
        // only report it lazily.
        std::fs::read_dir(self.config.inbox())?;

        let mut summary = ScanSummary::default();

        let walker = WalkDir::new(self.config.inbox()).min_depth(1).max_depth(1);
        for entry in walker.into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().is_file() || !self.config.qualifies(path) {
                continue;
            }

            summary.found += 1;
            if self.processor.process(path).is_success() {
                summary.processed += 1;
            } else {
                summary.failed += 1;
            }
        }

        if summary.found_any() {
            info!(
                found = summary.found,
                processed = summary.processed,
                failed = summary.failed,
                "startup scan complete"
            );
        } else {
            info!("no existing .xlsx files found in inbox");
        }

        Ok(summary)
    }
}
