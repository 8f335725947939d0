// src/pipeline/state.rs

//! Pure state machine for one build run.
//!
//! The machine owns the ordered list of groups and decides what runs next.
//! It performs no IO; [`super::build::run_build`] drives it by running the
//! requested task and feeding the result back in.

use tracing::{debug, warn};

use crate::errors::{PipelineError, Result};
use crate::tasks::TaskReport;
use crate::types::AssetGroup;

/// Where a build run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Not started yet.
    Pending,
    /// Waiting for this group's task to finish.
    Running(AssetGroup),
    /// Every task succeeded.
    Completed,
    /// This group's task failed; later groups never ran.
    Failed(AssetGroup),
}

impl BuildState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildState::Completed | BuildState::Failed(_))
    }
}

/// Reports of every task in a completed run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub tasks: Vec<TaskReport>,
}

impl BuildReport {
    pub fn groups(&self) -> Vec<AssetGroup> {
        self.tasks.iter().map(|t| t.group).collect()
    }
}

/// Decision returned after each transition.
#[derive(Debug)]
pub enum BuildStep {
    /// Run this group's task and report back with `on_task_finished`.
    Run(AssetGroup),
    /// The run finished successfully.
    Completed(BuildReport),
    /// The run stopped at the first failure; the task's error, untouched.
    Failed(PipelineError),
}

/// Sequential, fail-fast build run.
#[derive(Debug)]
pub struct BuildPipeline {
    order: Vec<AssetGroup>,
    next: usize,
    state: BuildState,
    completed: Vec<TaskReport>,
}

impl BuildPipeline {
    pub fn new(order: Vec<AssetGroup>) -> Self {
        Self {
            order,
            next: 0,
            state: BuildState::Pending,
            completed: Vec::new(),
        }
    }

    /// Styles, then scripts, then templates.
    pub fn standard() -> Self {
        Self::new(AssetGroup::ALL.to_vec())
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Leave `Pending` and request the first task.
    pub fn start(&mut self) -> BuildStep {
        if self.state != BuildState::Pending {
            warn!(state = ?self.state, "build pipeline started twice");
            return BuildStep::Failed(PipelineError::Other(anyhow::anyhow!(
                "build pipeline already started (state {:?})",
                self.state
            )));
        }
        self.advance()
    }

    /// Feed back the result of the task requested by the last `Run` step.
    pub fn on_task_finished(&mut self, group: AssetGroup, result: Result<TaskReport>) -> BuildStep {
        if self.state != BuildState::Running(group) {
            // A result for a task we did not ask for; treat it as a bug in
            // the driver rather than silently reordering the run.
            return BuildStep::Failed(PipelineError::Other(anyhow::anyhow!(
                "build pipeline received a result for '{group}' while in state {:?}",
                self.state
            )));
        }

        match result {
            Ok(report) => {
                debug!(%group, "build step succeeded");
                self.completed.push(report);
                self.advance()
            }
            Err(err) => {
                debug!(%group, "build step failed; aborting remaining steps");
                self.state = BuildState::Failed(group);
                BuildStep::Failed(err)
            }
        }
    }

    fn advance(&mut self) -> BuildStep {
        match self.order.get(self.next).copied() {
            Some(group) => {
                self.next += 1;
                self.state = BuildState::Running(group);
                BuildStep::Run(group)
            }
            None => {
                self.state = BuildState::Completed;
                BuildStep::Completed(BuildReport {
                    tasks: std::mem::take(&mut self.completed),
                })
            }
        }
    }
}
