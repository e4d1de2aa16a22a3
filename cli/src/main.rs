//! Command-line entry point for the data janitor.
//!
//! Runs the startup scan, then watches the inbox until Ctrl+C. Per-file
//! failures are logged and never change the exit code; only startup
//! failures (an inbox that cannot be created or read) abort the process.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use janitor_core::{BootstrapScanner, FileProcessor, InboxWatcher, JanitorConfig, WatchLoop};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "data-janitor",
    about = "Watches an inbox for .xlsx files, cleans them, and archives the originals"
)]
struct Cli {
    /// Inbox directory; `limpio/` and `crudo/` are created inside it.
    #[arg(long, default_value = "./data")]
    base_dir: PathBuf,

    /// Milliseconds to wait after a creation event before reading the file.
    #[arg(long, default_value_t = 1000)]
    settle_delay_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = JanitorConfig::new(&cli.base_dir)
        .with_settle_delay(Duration::from_millis(cli.settle_delay_ms));

    info!(inbox = %config.inbox().display(), "data-janitor starting");
    config.ensure_layout().with_context(|| {
        format!(
            "cannot create directory layout under {}",
            config.inbox().display()
        )
    })?;

    let processor = FileProcessor::new(config.clone());
    BootstrapScanner::new(&config, &processor)
        .scan()
        .context("startup scan failed")?;

    let mut watcher = InboxWatcher::new(config.clone());
    let events = watcher
        .subscribe()
        .context("failed to subscribe to inbox events")?;

    let watch_loop = WatchLoop::new(config.clone(), processor);
    let loop_handle = tokio::spawn(async move { watch_loop.run(events).await });

    info!("waiting for new files, press Ctrl+C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    info!("shutdown requested");
    watcher.stop();
    let handled = loop_handle.await?;
    info!(handled, "data-janitor stopped");

    Ok(())
}
