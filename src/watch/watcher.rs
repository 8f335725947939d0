// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::engine::{RuntimeEvent, TriggerReason};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::event_handler::EventProcessor;
use crate::watch::hash::{HashStore, MemoryHashStore};
use crate::watch::patterns::WatchProfile;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    dir: PathBuf,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("dir", &self.dir)
            .finish()
    }
}

/// Watch `dir` recursively and send `RuntimeEvent::TaskTriggered` for every
/// group whose patterns match a changed path.
///
/// - `root` is the project root the glob patterns are relative to.
/// - `dir` is the directory actually watched (the source root).
/// - `profiles` is the compiled per-group pattern set.
/// - `use_hash` enables content-hash dedupe of repeated events.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    dir: impl Into<PathBuf>,
    profiles: Vec<WatchProfile>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    use_hash: bool,
) -> Result<WatcherHandle> {
    let root = root.into();
    // Canonicalize once so we have a stable base path.
    let root = root.canonicalize().unwrap_or(root);
    let dir = dir.into();
    let dir = dir.canonicalize().unwrap_or(dir);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if event_tx.send(event).is_err() {
                    debug!("watch event loop gone; dropping notify event");
                }
            }
            Err(err) => warn!("file watch error: {err}"),
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::Recursive)?;
    info!(?dir, use_hash, "file watcher started");

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let hashes: Option<Box<dyn HashStore>> = use_hash.then(|| Box::new(MemoryHashStore::new()) as _);
    let mut processor = EventProcessor::new(root, Arc::new(profiles), fs, hashes);

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");

            // Hashing reads files; keep it off the event loop.
            let result = tokio::task::spawn_blocking(move || {
                let groups = processor.triggers(&event);
                (processor, groups)
            })
            .await;

            let (returned, groups) = match result {
                Ok(pair) => pair,
                Err(e) => {
                    error!("watch event processing aborted: {e}");
                    return;
                }
            };
            processor = returned;

            for group in groups {
                let event = RuntimeEvent::TaskTriggered {
                    group,
                    reason: TriggerReason::FileWatch,
                };
                if let Err(err) = runtime_tx.send(event).await {
                    // The runtime is gone; nothing left to trigger.
                    debug!("runtime channel closed: {err}");
                    return;
                }
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle {
        _inner: watcher,
        dir,
    })
}
