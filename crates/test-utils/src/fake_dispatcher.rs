use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use assetpipe::engine::{RuntimeEvent, TaskDispatcher, TaskOutcome};
use assetpipe::errors::Result;
use assetpipe::types::AssetGroup;
use tokio::sync::mpsc;

/// A fake dispatcher that:
/// - records which groups were dispatched
/// - immediately reports `TaskCompleted` for each one, failing the groups
///   it was told to fail.
pub struct FakeDispatcher {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    dispatched: Arc<Mutex<Vec<AssetGroup>>>,
    failing: HashSet<AssetGroup>,
}

impl FakeDispatcher {
    pub fn new(
        runtime_tx: mpsc::Sender<RuntimeEvent>,
        dispatched: Arc<Mutex<Vec<AssetGroup>>>,
    ) -> Self {
        Self {
            runtime_tx,
            dispatched,
            failing: HashSet::new(),
        }
    }

    pub fn failing(mut self, group: AssetGroup) -> Self {
        self.failing.insert(group);
        self
    }
}

impl TaskDispatcher for FakeDispatcher {
    fn dispatch(
        &mut self,
        group: AssetGroup,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.runtime_tx.clone();
        let dispatched = Arc::clone(&self.dispatched);
        let outcome = if self.failing.contains(&group) {
            TaskOutcome::Failed
        } else {
            TaskOutcome::Success
        };

        Box::pin(async move {
            dispatched.lock().unwrap().push(group);

            tx.send(RuntimeEvent::TaskCompleted { group, outcome })
                .await
                .map_err(anyhow::Error::from)?;
            Ok(())
        })
    }
}
