// src/config/mod.rs

//! Configuration loading and validation for assetpipe.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, or fall back to defaults (`loader.rs`).
//! - Validate paths, globs and targets and resolve group defaults
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    DEFAULT_CONFIG_FILE, config_root_dir, load_and_validate, load_from_path, load_or_default,
};
pub use model::{
    DirsSection, PathEntry, PathEntryConfig, PathsSection, PipelineConfig, RawConfigFile,
    ScriptsSection, ServerSection, StylesSection, WatchSection,
};
pub use validate::validate_config;
