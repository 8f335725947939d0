// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::engine::queue::TriggerQueue;
use crate::engine::{RuntimeOptions, TaskOutcome, TriggerReason};
use crate::types::{AssetGroup, TriggerWhileRunningBehaviour};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Run this group's task.
    DispatchTask(AssetGroup),
    /// Tell every connected browser to reload (after `group` re-ran).
    SignalReload(AssetGroup),
    /// Request that the runtime exits (used with `exit_when_idle`).
    RequestExit,
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    pub(crate) fn keep(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }
}

/// Number of in-flight runs per group.
pub type InFlight = HashMap<AssetGroup, usize>;

/// Handle a task trigger event.
///
/// - Idle group: dispatch immediately.
/// - Running group, `Queue`: remember one follow-up run.
/// - Running group, `Parallel`: dispatch anyway.
pub fn handle_task_trigger(
    in_flight: &mut InFlight,
    queue: &mut TriggerQueue,
    behaviour: TriggerWhileRunningBehaviour,
    group: AssetGroup,
    reason: TriggerReason,
) -> CoreStep {
    let running = in_flight.get(&group).copied().unwrap_or(0);

    if running > 0 && behaviour == TriggerWhileRunningBehaviour::Queue {
        queue.record_trigger(group);
        return CoreStep::keep(Vec::new());
    }

    debug!(%group, ?reason, running, "dispatching task");
    *in_flight.entry(group).or_insert(0) += 1;
    CoreStep::keep(vec![CoreCommand::DispatchTask(group)])
}

/// Handle a task completion event.
///
/// A success is followed by a reload signal; a failure is not. Either way a
/// pending follow-up run for the same group is dispatched next.
pub fn handle_task_completion(
    in_flight: &mut InFlight,
    queue: &mut TriggerQueue,
    options: &RuntimeOptions,
    group: AssetGroup,
    outcome: TaskOutcome,
) -> CoreStep {
    let mut commands = Vec::new();

    match in_flight.get_mut(&group) {
        Some(n) if *n > 0 => *n -= 1,
        _ => {
            warn!(%group, "completion for a task that was not in flight; ignoring");
            return CoreStep::keep(commands);
        }
    }

    if outcome == TaskOutcome::Success {
        commands.push(CoreCommand::SignalReload(group));
    }

    if queue.take(group) {
        debug!(%group, "starting queued re-run");
        *in_flight.entry(group).or_insert(0) += 1;
        commands.push(CoreCommand::DispatchTask(group));
    }

    let mut keep_running = true;
    if options.exit_when_idle && is_idle(in_flight) && queue.is_empty() {
        keep_running = false;
        commands.push(CoreCommand::RequestExit);
    }

    CoreStep {
        commands,
        keep_running,
    }
}

pub fn is_idle(in_flight: &InFlight) -> bool {
    in_flight.values().all(|n| *n == 0)
}
