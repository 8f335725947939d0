// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces:
//! - an updated core state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - handing groups to the task dispatcher
//! - signalling the reload hub
//! - handling Ctrl+C / shutdown

use crate::engine::event_handlers::{
    CoreStep, InFlight, handle_task_completion, handle_task_trigger, is_idle,
};
use crate::engine::queue::TriggerQueue;
use crate::engine::{RuntimeEvent, RuntimeOptions};
use crate::types::{AssetGroup, TriggerWhileRunningBehaviour};

/// Pure core runtime state.
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreRuntime {
    behaviour: TriggerWhileRunningBehaviour,
    in_flight: InFlight,
    queue: TriggerQueue,
    options: RuntimeOptions,
}

impl CoreRuntime {
    pub fn new(behaviour: TriggerWhileRunningBehaviour, options: RuntimeOptions) -> Self {
        Self {
            behaviour,
            in_flight: InFlight::new(),
            queue: TriggerQueue::new(),
            options,
        }
    }

    /// True when no task is in flight.
    pub fn is_idle(&self) -> bool {
        is_idle(&self.in_flight)
    }

    /// Expose queue emptiness (for tests).
    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of runs of `group` currently in flight.
    pub fn in_flight(&self, group: AssetGroup) -> usize {
        self.in_flight.get(&group).copied().unwrap_or(0)
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::TaskTriggered { group, reason } => handle_task_trigger(
                &mut self.in_flight,
                &mut self.queue,
                self.behaviour,
                group,
                reason,
            ),
            RuntimeEvent::TaskCompleted { group, outcome } => handle_task_completion(
                &mut self.in_flight,
                &mut self.queue,
                &self.options,
                group,
                outcome,
            ),
            RuntimeEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }
}
