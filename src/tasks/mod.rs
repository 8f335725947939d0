// src/tasks/mod.rs

//! The three build tasks and the runner abstraction that executes them.
//!
//! - [`style`] compiles the stylesheet entry, prefixes it and writes the
//!   CSS plus its source map.
//! - [`script`] lowers the script entry to the configured ECMAScript target.
//! - [`template`] copies the template verbatim.
//! - [`backend`] provides the `TaskRunner` trait used by the orchestrators
//!   and the production `LocalTaskRunner`; tests swap in a fake.
//!
//! Every task is synchronous, idempotent and touches the disk only through
//! [`FileSystem`].

pub mod backend;
pub mod script;
pub mod style;
pub mod template;

use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::errors::{PipelineError, Result};
use crate::fs::FileSystem;
use crate::types::AssetGroup;

pub use backend::{LocalTaskRunner, TaskFuture, TaskRunner};

/// What a finished task wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub group: AssetGroup,
    pub outputs: Vec<PathBuf>,
}

/// Run the task bound to `group` to completion.
pub fn run_task(
    config: &PipelineConfig,
    fs: &dyn FileSystem,
    group: AssetGroup,
) -> Result<TaskReport> {
    let outputs = match group {
        AssetGroup::Styles => style::compile_styles(config, fs)?,
        AssetGroup::Scripts => script::transpile_scripts(config, fs)?,
        AssetGroup::Templates => template::copy_templates(config, fs)?,
    };
    Ok(TaskReport { group, outputs })
}

/// Fail with `MissingSource` unless `path` is a regular file.
fn require_source(fs: &dyn FileSystem, path: &Path) -> Result<()> {
    if fs.is_file(path) {
        Ok(())
    } else {
        Err(PipelineError::MissingSource(path.to_path_buf()))
    }
}

/// File name of a configured source, which `validate` guarantees exists.
fn file_name_of(path: &Path) -> Result<&std::ffi::OsStr> {
    path.file_name().ok_or_else(|| {
        PipelineError::ConfigError(format!("source path {:?} has no file name", path))
    })
}
