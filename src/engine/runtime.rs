// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::dispatch::TaskDispatcher;
use crate::errors::Result;
use crate::live::ReloadHub;

use super::core::CoreRuntime;
use super::{CoreCommand, RuntimeEvent};

/// Drives the watch engine in response to `RuntimeEvent`s.
///
/// This is a pure IO shell around `CoreRuntime`, which contains all the
/// runtime semantics. It reads events from the channel, hands groups to
/// the dispatcher and forwards reload signals to the hub.
pub struct Runtime<D: TaskDispatcher> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    dispatcher: D,
    reload: ReloadHub,
}

impl<D: TaskDispatcher> fmt::Debug for Runtime<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("reload", &self.reload)
            .finish_non_exhaustive()
    }
}

impl<D: TaskDispatcher> Runtime<D> {
    pub fn new(
        core: CoreRuntime,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        dispatcher: D,
        reload: ReloadHub,
    ) -> Self {
        Self {
            core,
            event_rx,
            dispatcher,
            reload,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes `RuntimeEvent`s from `event_rx`.
    /// - Feeds them into the core runtime.
    /// - Executes commands returned by the core (dispatch, reload, exit).
    pub async fn run(mut self) -> Result<()> {
        info!("watch runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        info!("watch runtime exiting");
        Ok(())
    }

    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::DispatchTask(group) => {
                debug!(%group, "dispatching task");
                self.dispatcher.dispatch(group).await?;
            }
            CoreCommand::SignalReload(group) => {
                let clients = self.reload.signal();
                info!(%group, clients, "reload signalled");
            }
            CoreCommand::RequestExit => {
                // keep_running is already false in this case; just log it.
                info!("core issued RequestExit command");
            }
        }
        Ok(())
    }
}
