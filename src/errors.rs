// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Task errors carry the underlying compiler/transformer message verbatim;
//! orchestrators propagate them without adding context.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Source file not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("{message}")]
    StyleError { path: PathBuf, message: String },

    #[error("{message}")]
    ScriptError { path: PathBuf, message: String },

    #[error("failed to bind live server on {addr}: {source}")]
    BindError {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File watch error: {0}")]
    WatchError(#[from] notify::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Task aborted: {0}")]
    TaskAborted(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PipelineError>;
