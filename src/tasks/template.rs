// src/tasks/template.rs

use std::path::PathBuf;

use tracing::info;

use crate::config::PipelineConfig;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::AssetGroup;

use super::{file_name_of, require_source};

/// Copy the template entry byte-for-byte into the destination root.
pub fn copy_templates(config: &PipelineConfig, fs: &dyn FileSystem) -> Result<Vec<PathBuf>> {
    let source = config.source_path(AssetGroup::Templates);
    require_source(fs, &source)?;

    let dest = config
        .dest_path(AssetGroup::Templates)
        .join(file_name_of(&source)?);

    let bytes = fs.read(&source)?;
    fs.write(&dest, &bytes)?;

    info!(group = %AssetGroup::Templates, output = ?dest, "template copied");
    Ok(vec![dest])
}
