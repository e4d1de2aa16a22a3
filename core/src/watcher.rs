//! Inbox watching and the event-consumer loop.
//!
//! [`InboxWatcher`] owns the `notify` subscription and pushes creation
//! events into a bounded channel; [`WatchLoop`] is the consumer. Splitting
//! the two keeps shutdown simple: stopping the watcher drops the sender,
//! the channel drains, and the loop returns. Events that arrive while the
//! loop is inside a settle delay queue in the channel and are handled
//! serially afterwards; no two files are ever processed concurrently.

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::JanitorConfig;
use crate::error::Result;
use crate::event::FileEvent;
use crate::processor::FileProcessor;

/// Watches the inbox for newly-created files.
pub struct InboxWatcher {
    config: JanitorConfig,

    /// Internal notify watcher; present while subscribed.
    watcher: Option<RecommendedWatcher>,
}

impl InboxWatcher {
    /// Create a watcher for the configured inbox.
    pub fn new(config: JanitorConfig) -> Self {
        Self {
            config,
            watcher: None,
        }
    }

    /// Subscribe to creation events under the inbox (non-recursive).
    ///
    /// Returns the receiving end of the event channel. The notify callback
    /// runs on the notification thread and forwards one [`FileEvent`] per
    /// created path; every other event kind is ignored at the source.
    pub fn subscribe(&mut self) -> Result<mpsc::Receiver<FileEvent>> {
        let (event_tx, event_rx) = mpsc::channel(self.config.channel_capacity);

        let mut watcher = notify::recommended_watcher(
            move |res: std::result::Result<notify::Event, notify::Error>| match res {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Create(_)) {
                        return;
                    }
                    for path in event.paths {
                        let file_event = FileEvent::created(path);
                        if event_tx.blocking_send(file_event).is_err() {
                            // Consumer already gone; the event is dropped.
                            warn!("event channel closed, dropping file event");
                        }
                    }
                }
                Err(e) => {
                    error!("watch error: {e}");
                }
            },
        )?;

        watcher.watch(self.config.inbox(), RecursiveMode::NonRecursive)?;
        self.watcher = Some(watcher);

        info!(inbox = %self.config.inbox().display(), "watching inbox for new files");
        Ok(event_rx)
    }

    /// Unsubscribe from the inbox.
    ///
    /// Drops the underlying watcher and with it the sending end of the
    /// channel, so a running [`WatchLoop`] drains whatever is queued and
    /// then returns. Events after this point are ignored.
    pub fn stop(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            let _ = watcher.unwatch(self.config.inbox());
        }
        info!("inbox watcher stopped");
    }

    /// Whether the watcher is currently subscribed.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }
}

/// Consumes file events until the channel closes.
pub struct WatchLoop {
    config: JanitorConfig,
    processor: FileProcessor,
}

impl WatchLoop {
    /// Create a loop over the given configuration and processor.
    pub fn new(config: JanitorConfig, processor: FileProcessor) -> Self {
        Self { config, processor }
    }

    /// Run until the event channel closes. Returns how many qualifying
    /// files were handed to the processor.
    ///
    /// Each qualifying event waits out the settle delay before the file is
    /// read, so a writer still flushing the file gets to finish. The wait
    /// happens inline: later events stay queued behind it.
    pub async fn run(&self, mut events: mpsc::Receiver<FileEvent>) -> usize {
        let mut handled = 0;

        while let Some(event) = events.recv().await {
            if event.is_directory || !self.config.qualifies(&event.path) {
                debug!(path = %event.path.display(), "ignoring event");
                continue;
            }

            tokio::time::sleep(self.config.settle_delay).await;
            self.processor.process(&event.path);
            handled += 1;
        }

        info!(handled, "event channel closed, watch loop finished");
        handled
    }
}
