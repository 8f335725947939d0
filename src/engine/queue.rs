// src/engine/queue.rs

use std::collections::BTreeSet;

use tracing::debug;

use crate::types::AssetGroup;

/// Groups that were triggered while their task was already running.
///
/// Semantics:
/// - Each group is pending at most once. Any number of triggers that
///   arrive during one run coalesce into a single follow-up run.
/// - When the running task completes, the runtime calls `take(group)`; if
///   it returns true exactly one re-run is dispatched.
#[derive(Debug, Default)]
pub struct TriggerQueue {
    pending: BTreeSet<AssetGroup>,
}

impl TriggerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no queued triggers.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Record a trigger for a running group.
    ///
    /// Returns false if the group was already pending (the trigger was
    /// merged into the existing follow-up run).
    pub fn record_trigger(&mut self, group: AssetGroup) -> bool {
        let inserted = self.pending.insert(group);
        debug!(%group, inserted, "recorded trigger while running (queue mode)");
        inserted
    }

    /// Remove the pending trigger for `group`, returning whether there was one.
    pub fn take(&mut self, group: AssetGroup) -> bool {
        self.pending.remove(&group)
    }
}
