// src/pipeline/watch_mode.rs

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent, RuntimeOptions, RunnerDispatcher};
use crate::errors::Result;
use crate::live::ReloadHub;
use crate::tasks::TaskRunner;
use crate::watch::{build_profiles, spawn_watcher};

/// Watch the source root and re-run groups as their sources change.
///
/// Successful re-runs signal `hub`. Returns once Ctrl-C is received.
pub async fn run_watch(
    config: Arc<PipelineConfig>,
    runner: Arc<dyn TaskRunner>,
    hub: ReloadHub,
) -> Result<()> {
    let profiles = build_profiles(&config)?;

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let _watcher = spawn_watcher(
        config.root(),
        config.source_dir(),
        profiles,
        rt_tx.clone(),
        config.watch.use_hash,
    )?;

    spawn_ctrl_c_handler(rt_tx.clone());

    let dispatcher = RunnerDispatcher::new(runner, rt_tx);
    let core = CoreRuntime::new(config.watch.behaviour, RuntimeOptions::default());

    info!(behaviour = ?config.watch.behaviour, "watching for changes");
    Runtime::new(core, rt_rx, dispatcher, hub).run().await
}

/// Ctrl-C → graceful shutdown.
pub fn spawn_ctrl_c_handler(tx: mpsc::Sender<RuntimeEvent>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
    });
}
