// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::{PipelineConfig, RawConfigFile};
use crate::errors::Result;

/// Default config file name, looked up in the current working directory.
pub const DEFAULT_CONFIG_FILE: &str = "Assetpipe.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file, validate it, and anchor it at the file's
/// directory.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let raw_config = load_from_path(path)?;
    let config = PipelineConfig::try_from(raw_config)?;
    Ok(config.with_root(config_root_dir(path)))
}

/// Like [`load_and_validate`], but a missing file yields the built-in
/// layout (rooted next to where the file would have been).
pub fn load_or_default(path: impl AsRef<Path>) -> Result<PipelineConfig> {
    let path = path.as_ref();
    if path.is_file() {
        debug!(?path, "loading config file");
        return load_and_validate(path);
    }

    info!(?path, "no config file found; using built-in defaults");
    let config = PipelineConfig::try_from(RawConfigFile::default())?;
    Ok(config.with_root(config_root_dir(path)))
}

/// Figure out the project root for a config path.
///
/// - If the config path has a non-empty parent (e.g. "web/Assetpipe.toml"),
///   we use that directory.
/// - If it's just a bare filename (parent = ""), we use ".".
pub fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
