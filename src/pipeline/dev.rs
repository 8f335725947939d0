// src/pipeline/dev.rs

//! Build, then serve, then watch.

use std::sync::Arc;

use tracing::info;

use crate::config::PipelineConfig;
use crate::errors::Result;
use crate::live::{LiveServer, ReloadHub};
use crate::tasks::{TaskFuture, TaskRunner};

use super::build::build_all;
use super::watch_mode::run_watch;

/// The three stages of a dev session.
///
/// `run_dev` only talks to this trait so the sequencing can be checked
/// without compiling anything or binding a port.
pub trait DevStages: Send {
    fn build(&mut self) -> TaskFuture<'_, ()>;
    fn live(&mut self) -> TaskFuture<'_, ()>;
    fn watch(&mut self) -> TaskFuture<'_, ()>;
}

/// Await each stage before starting the next. The first error is returned
/// unchanged and nothing is rolled back.
pub async fn run_dev<S>(stages: &mut S) -> Result<()>
where
    S: DevStages + ?Sized,
{
    info!("dev: building");
    stages.build().await?;

    info!("dev: starting live server");
    stages.live().await?;

    info!("dev: watching");
    stages.watch().await
}

/// Production stages over a real project.
pub struct ProjectStages {
    config: Arc<PipelineConfig>,
    runner: Arc<dyn TaskRunner>,
    hub: ReloadHub,
    server: Option<LiveServer>,
}

impl std::fmt::Debug for ProjectStages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStages")
            .field("hub", &self.hub)
            .field("server", &self.server)
            .finish_non_exhaustive()
    }
}

impl ProjectStages {
    pub fn new(config: Arc<PipelineConfig>, runner: Arc<dyn TaskRunner>) -> Self {
        Self {
            config,
            runner,
            hub: ReloadHub::new(),
            server: None,
        }
    }
}

impl DevStages for ProjectStages {
    fn build(&mut self) -> TaskFuture<'_, ()> {
        Box::pin(async move {
            build_all(self.runner.as_ref()).await?;
            Ok(())
        })
    }

    fn live(&mut self) -> TaskFuture<'_, ()> {
        Box::pin(async move {
            let server = LiveServer::start(&self.config, self.hub.clone()).await?;
            info!(url = %server.url(), "serving");
            self.server = Some(server);
            Ok(())
        })
    }

    fn watch(&mut self) -> TaskFuture<'_, ()> {
        Box::pin(async move {
            let result = run_watch(
                Arc::clone(&self.config),
                Arc::clone(&self.runner),
                self.hub.clone(),
            )
            .await;

            if let Some(server) = self.server.take() {
                server.stop();
            }
            result
        })
    }
}
