use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use assetpipe::errors::PipelineError;
use assetpipe::tasks::{TaskFuture, TaskReport, TaskRunner};
use assetpipe::types::AssetGroup;

/// A fake task runner that:
/// - records which groups were run, in order
/// - fails the groups it was told to fail with a `ScriptError`-style message
/// - succeeds for everything else without touching the disk.
#[derive(Debug, Clone, Default)]
pub struct FakeTaskRunner {
    executed: Arc<Mutex<Vec<AssetGroup>>>,
    failing: HashSet<AssetGroup>,
}

impl FakeTaskRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, group: AssetGroup) -> Self {
        self.failing.insert(group);
        self
    }

    pub fn executed(&self) -> Vec<AssetGroup> {
        self.executed.lock().unwrap().clone()
    }
}

/// The message a failing fake task reports.
pub fn failure_message(group: AssetGroup) -> String {
    format!("fake {group} failure")
}

impl TaskRunner for FakeTaskRunner {
    fn run_task(&self, group: AssetGroup) -> TaskFuture<'_, TaskReport> {
        Box::pin(async move {
            self.executed.lock().unwrap().push(group);

            if self.failing.contains(&group) {
                return Err(PipelineError::ScriptError {
                    path: PathBuf::from(format!("{group}.src")),
                    message: failure_message(group),
                });
            }

            Ok(TaskReport {
                group,
                outputs: Vec::new(),
            })
        })
    }
}
