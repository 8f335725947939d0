// src/engine/mod.rs

//! Watch-mode orchestration engine.
//!
//! This module ties together:
//! - the per-group trigger queue (what happens when a change arrives while
//!   that group's task is still running)
//! - the main runtime event loop that reacts to:
//!   - file-watch triggers
//!   - task completion events
//!   - shutdown signals
//! - the reload hub, signalled after every successful re-run
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`], and task execution is behind
//! [`dispatch::TaskDispatcher`].

use crate::types::AssetGroup;

/// Outcome of a task run as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed,
}

/// Why a task was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// Manual trigger (e.g. from tests or a future control channel).
    Manual,
    /// Triggered due to a filesystem event.
    FileWatch,
}

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// If true, exit the runtime once nothing is running and nothing is
    /// queued. Watch mode never sets this; tests do.
    pub exit_when_idle: bool,
}

/// Events flowing into the runtime from the watcher and the dispatcher.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A group's task should be (re-)run.
    TaskTriggered {
        group: AssetGroup,
        reason: TriggerReason,
    },
    /// A dispatched task finished.
    TaskCompleted {
        group: AssetGroup,
        outcome: TaskOutcome,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod dispatch;
pub mod event_handlers;
pub mod queue;
pub mod runtime;

pub use core::CoreRuntime;
pub use dispatch::{RunnerDispatcher, TaskDispatcher};
pub use event_handlers::{CoreCommand, CoreStep};
pub use queue::TriggerQueue;
pub use crate::types::TriggerWhileRunningBehaviour;
pub use runtime::Runtime;
