// src/engine/dispatch.rs

//! Pluggable task dispatch for the watch runtime.
//!
//! The runtime talks to a `TaskDispatcher` instead of awaiting tasks
//! itself, so that different groups can run concurrently while the event
//! loop keeps consuming file events.
//!
//! - `RunnerDispatcher` spawns each dispatched task on Tokio, runs it through
//!   a [`TaskRunner`] and reports back with `RuntimeEvent::TaskCompleted`.
//! - Tests can provide their own dispatcher that records groups and emits
//!   completions directly.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::engine::{RuntimeEvent, TaskOutcome};
use crate::errors::Result;
use crate::tasks::TaskRunner;
use crate::types::AssetGroup;

/// Trait abstracting how a triggered group is executed.
pub trait TaskDispatcher: Send {
    /// Start the task for `group`. Must not wait for it to finish; the
    /// outcome is reported later as a `TaskCompleted` event.
    fn dispatch(
        &mut self,
        group: AssetGroup,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Production dispatcher backed by a [`TaskRunner`].
pub struct RunnerDispatcher {
    runner: Arc<dyn TaskRunner>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
}

impl RunnerDispatcher {
    pub fn new(runner: Arc<dyn TaskRunner>, runtime_tx: mpsc::Sender<RuntimeEvent>) -> Self {
        Self { runner, runtime_tx }
    }
}

impl TaskDispatcher for RunnerDispatcher {
    fn dispatch(
        &mut self,
        group: AssetGroup,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let runner = Arc::clone(&self.runner);
        let tx = self.runtime_tx.clone();

        Box::pin(async move {
            tokio::spawn(async move {
                let outcome = match runner.run_task(group).await {
                    Ok(report) => {
                        info!(%group, outputs = ?report.outputs, "task re-run finished");
                        TaskOutcome::Success
                    }
                    Err(err) => {
                        // Compiler output is passed through as-is.
                        error!(%group, "{err}");
                        TaskOutcome::Failed
                    }
                };

                if let Err(e) = tx.send(RuntimeEvent::TaskCompleted { group, outcome }).await {
                    error!(%group, "failed to report task completion: {e}");
                }
            });
            Ok(())
        })
    }
}
