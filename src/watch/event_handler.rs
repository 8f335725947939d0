// src/watch/event_handler.rs

//! Turning notify events into group triggers.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::event::{MetadataKind, ModifyKind};
use notify::{Event, EventKind};
use tracing::{debug, info, warn};

use crate::fs::FileSystem;
use crate::types::AssetGroup;
use crate::watch::hash::{HashStore, compute_file_hash};
use crate::watch::path_utils::relative_str;
use crate::watch::patterns::WatchProfile;

/// Only content-affecting events count. Reads (ours included) show up as
/// access events and must never re-trigger a task.
pub fn is_relevant_event(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::AccessTime)) => false,
        EventKind::Modify(_) => true,
        EventKind::Access(_) | EventKind::Any | EventKind::Other => false,
    }
}

/// Every group whose profile matches at least one of `paths`.
///
/// Each group appears once, however many paths hit it.
pub fn groups_for_paths<P: AsRef<Path>>(
    root: &Path,
    paths: &[P],
    profiles: &[WatchProfile],
) -> BTreeSet<AssetGroup> {
    let mut groups = BTreeSet::new();

    for path in paths {
        let path = path.as_ref();
        let Some(rel) = relative_str(root, path) else {
            warn!(?path, ?root, "could not relativize event path");
            continue;
        };

        for profile in profiles.iter().filter(|p| p.matches(&rel)) {
            debug!(group = %profile.group(), path = %rel, "watch match");
            groups.insert(profile.group());
        }
    }

    groups
}

/// Stateful per-watcher event processing: relevance filter, optional
/// content-hash dedupe, then glob matching.
pub struct EventProcessor {
    root: PathBuf,
    profiles: Arc<Vec<WatchProfile>>,
    fs: Arc<dyn FileSystem>,
    hashes: Option<Box<dyn HashStore>>,
}

impl std::fmt::Debug for EventProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventProcessor")
            .field("root", &self.root)
            .field("profiles", &self.profiles)
            .field("use_hash", &self.hashes.is_some())
            .finish()
    }
}

impl EventProcessor {
    pub fn new(
        root: PathBuf,
        profiles: Arc<Vec<WatchProfile>>,
        fs: Arc<dyn FileSystem>,
        hashes: Option<Box<dyn HashStore>>,
    ) -> Self {
        Self {
            root,
            profiles,
            fs,
            hashes,
        }
    }

    /// Groups to trigger for one notify event.
    pub fn triggers(&mut self, event: &Event) -> BTreeSet<AssetGroup> {
        if !is_relevant_event(&event.kind) {
            return BTreeSet::new();
        }

        let paths = match self.hashes.as_deref_mut() {
            Some(store) => changed_paths(self.fs.as_ref(), store, &event.kind, &event.paths),
            None => event.paths.clone(),
        };

        groups_for_paths(&self.root, &paths, &self.profiles)
    }
}

/// Drop paths whose content hash matches the last one seen.
///
/// Removed files are always kept (and forgotten). If a file cannot be hashed
/// it is kept, so a hashing problem never hides a real change.
fn changed_paths(
    fs: &dyn FileSystem,
    store: &mut dyn HashStore,
    kind: &EventKind,
    paths: &[PathBuf],
) -> Vec<PathBuf> {
    let mut kept = Vec::with_capacity(paths.len());

    for path in paths {
        if matches!(kind, EventKind::Remove(_)) || !fs.is_file(path) {
            store.forget(path);
            kept.push(path.clone());
            continue;
        }

        match compute_file_hash(fs, path) {
            Ok(hash) => {
                if store.update(path, hash) {
                    kept.push(path.clone());
                } else {
                    info!(?path, "content unchanged; skipping");
                }
            }
            Err(err) => {
                warn!(?path, "failed to hash file; treating as changed: {err:#}");
                kept.push(path.clone());
            }
        }
    }

    kept
}
