//! # Data Janitor Core
//!
//! This crate implements the library half of `data-janitor`, a single-machine
//! utility that watches an inbox directory for newly-arrived `.xlsx` files,
//! normalizes their tabular content, and archives the originals.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Data Janitor                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  BootstrapScanner ─┐                                         │
//! │                    ├──► FileProcessor ──► Cleaner            │
//! │  WatchLoop ────────┘         │                               │
//! │       ▲                      ▼                               │
//! │  InboxWatcher        limpio/ + crudo/                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every file is handled exactly once: files already present at startup go
//! through [`BootstrapScanner`], files created afterwards arrive as events
//! on the [`InboxWatcher`] channel and are consumed by [`WatchLoop`]. Both
//! paths feed the same [`FileProcessor`], one file at a time.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod event;
pub mod processor;
pub mod scanner;
pub mod sheet;
pub mod table;
pub mod watcher;

pub use cleaner::clean;
pub use config::JanitorConfig;
pub use error::{JanitorError, Result};
pub use event::FileEvent;
pub use processor::{FileProcessor, ProcessingOutcome};
pub use scanner::{BootstrapScanner, ScanSummary};
pub use table::{Cell, Column, SpreadsheetTable};
pub use watcher::{InboxWatcher, WatchLoop};
