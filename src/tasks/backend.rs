// src/tasks/backend.rs

//! Pluggable task runner abstraction.
//!
//! The build orchestrator and the watch dispatcher talk to a `TaskRunner`
//! instead of calling the tasks directly. This makes it easy to swap in a
//! fake runner in tests while keeping the production implementation here.
//!
//! - `LocalTaskRunner` is the default implementation used by `assetpipe`.
//!   It runs each task body on Tokio's blocking pool so compiles and file
//!   IO never stall the event loop.
//! - Tests can provide their own `TaskRunner` that, for example, records
//!   which groups ran and fails selected ones.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::config::PipelineConfig;
use crate::errors::{PipelineError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::AssetGroup;

use super::{TaskReport, run_task};

/// Boxed future returned by runner methods.
pub type TaskFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Trait abstracting how a single task is executed.
pub trait TaskRunner: Send + Sync {
    /// Run the task bound to `group` and resolve once it has finished.
    fn run_task(&self, group: AssetGroup) -> TaskFuture<'_, TaskReport>;
}

/// Production runner: executes the real tasks against a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct LocalTaskRunner {
    config: Arc<PipelineConfig>,
    fs: Arc<dyn FileSystem>,
}

impl LocalTaskRunner {
    /// Runner over the real filesystem.
    pub fn new(config: Arc<PipelineConfig>) -> Self {
        Self::with_fs(config, Arc::new(RealFileSystem))
    }

    pub fn with_fs(config: Arc<PipelineConfig>, fs: Arc<dyn FileSystem>) -> Self {
        Self { config, fs }
    }
}

impl TaskRunner for LocalTaskRunner {
    fn run_task(&self, group: AssetGroup) -> TaskFuture<'_, TaskReport> {
        // Clone the shared state so the blocking closure owns it.
        let config = Arc::clone(&self.config);
        let fs = Arc::clone(&self.fs);

        Box::pin(async move {
            debug!(%group, "starting task");
            tokio::task::spawn_blocking(move || run_task(&config, fs.as_ref(), group))
                .await
                .map_err(|e| PipelineError::TaskAborted(format!("{group}: {e}")))?
        })
    }
}

impl<T: TaskRunner + ?Sized> TaskRunner for Arc<T> {
    fn run_task(&self, group: AssetGroup) -> TaskFuture<'_, TaskReport> {
        (**self).run_task(group)
    }
}
