// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod live;
pub mod logging;
pub mod pipeline;
pub mod tasks;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::load_or_default;
use crate::errors::Result;
use crate::live::{LiveServer, ReloadHub};
use crate::pipeline::{ProjectStages, build_all, run_build, run_dev, run_watch};
use crate::tasks::{LocalTaskRunner, TaskRunner};
use crate::types::AssetGroup;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (defaults when the file is missing)
/// - the task runner
/// - whichever orchestrator the command selects
pub async fn run(args: CliArgs) -> Result<()> {
    let command = args.command();
    let config = Arc::new(load_or_default(&args.config)?);
    debug!(?command, root = ?config.root(), "loaded configuration");

    let runner: Arc<dyn TaskRunner> = Arc::new(LocalTaskRunner::new(Arc::clone(&config)));

    match command {
        Command::Styles => run_single(runner.as_ref(), AssetGroup::Styles).await,
        Command::Scripts => run_single(runner.as_ref(), AssetGroup::Scripts).await,
        Command::Templates => run_single(runner.as_ref(), AssetGroup::Templates).await,
        Command::Build => {
            build_all(runner.as_ref()).await?;
            Ok(())
        }
        Command::Live => {
            let server = LiveServer::start(&config, ReloadHub::new()).await?;
            info!(url = %server.url(), "serving; press Ctrl-C to stop");
            tokio::signal::ctrl_c().await?;
            server.stop();
            Ok(())
        }
        // Nobody is connected to this hub; reloads are simply dropped.
        Command::Watch => run_watch(config, runner, ReloadHub::new()).await,
        Command::Dev => {
            let mut stages = ProjectStages::new(config, runner);
            run_dev(&mut stages).await
        }
    }
}

async fn run_single(runner: &dyn TaskRunner, group: AssetGroup) -> Result<()> {
    run_build(runner, &[group]).await?;
    Ok(())
}
