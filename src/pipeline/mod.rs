// src/pipeline/mod.rs

//! Orchestrators: the sequential build, watch mode and the dev session.

pub mod build;
pub mod dev;
pub mod state;
pub mod watch_mode;

pub use build::{build_all, run_build};
pub use dev::{DevStages, ProjectStages, run_dev};
pub use state::{BuildPipeline, BuildReport, BuildState, BuildStep};
pub use watch_mode::{run_watch, spawn_ctrl_c_handler};
