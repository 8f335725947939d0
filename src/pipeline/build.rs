// src/pipeline/build.rs

use tracing::{error, info};

use crate::errors::Result;
use crate::tasks::TaskRunner;
use crate::types::AssetGroup;

use super::state::{BuildPipeline, BuildReport, BuildStep};

/// Run `order` strictly sequentially through `runner`.
///
/// Task N+1 is only started once task N's future has resolved. The first
/// failure ends the run and its error is returned unchanged.
pub async fn run_build<R>(runner: &R, order: &[AssetGroup]) -> Result<BuildReport>
where
    R: TaskRunner + ?Sized,
{
    let mut pipeline = BuildPipeline::new(order.to_vec());
    let mut step = pipeline.start();

    loop {
        match step {
            BuildStep::Run(group) => {
                let result = runner.run_task(group).await;
                step = pipeline.on_task_finished(group, result);
            }
            BuildStep::Completed(report) => {
                info!(groups = ?report.groups(), "build completed");
                return Ok(report);
            }
            BuildStep::Failed(err) => {
                error!(state = ?pipeline.state(), "build failed");
                return Err(err);
            }
        }
    }
}

/// The full build: styles, scripts, templates.
pub async fn build_all<R>(runner: &R) -> Result<BuildReport>
where
    R: TaskRunner + ?Sized,
{
    run_build(runner, &AssetGroup::ALL).await
}
