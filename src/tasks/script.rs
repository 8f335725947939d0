// src/tasks/script.rs

//! Script task: lower modern syntax to an older ECMAScript target.

use std::path::{Path, PathBuf};

use oxc::allocator::Allocator;
use oxc::codegen::Codegen;
use oxc::diagnostics::OxcDiagnostic;
use oxc::parser::Parser;
use oxc::semantic::SemanticBuilder;
use oxc::span::SourceType;
use oxc::transformer::{TransformOptions, Transformer};
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::errors::{PipelineError, Result};
use crate::fs::FileSystem;
use crate::types::AssetGroup;

use super::{file_name_of, require_source};

/// Transpile the configured script entry into its destination directory.
pub fn transpile_scripts(config: &PipelineConfig, fs: &dyn FileSystem) -> Result<Vec<PathBuf>> {
    let source = config.source_path(AssetGroup::Scripts);
    let dest = config
        .dest_path(AssetGroup::Scripts)
        .join(file_name_of(&source)?);

    let code = transpile_script(fs, &source, &config.script.target)?;
    fs.write(&dest, code.as_bytes())?;

    info!(group = %AssetGroup::Scripts, output = ?dest, "scripts transpiled");
    Ok(vec![dest])
}

/// Transpile one script to `target` without writing anything.
pub fn transpile_script(fs: &dyn FileSystem, source: &Path, target: &str) -> Result<String> {
    require_source(fs, source)?;
    let source_text = fs.read_to_string(source)?;

    let allocator = Allocator::default();
    let source_type = SourceType::from_path(source).unwrap_or_else(|_| SourceType::mjs());

    let parsed = Parser::new(&allocator, &source_text, source_type).parse();
    if !parsed.errors.is_empty() {
        return Err(script_error(source, &parsed.errors));
    }
    let mut program = parsed.program;

    let semantic = SemanticBuilder::new().build(&program);
    if !semantic.errors.is_empty() {
        return Err(script_error(source, &semantic.errors));
    }
    let scoping = semantic.semantic.into_scoping();

    let options = TransformOptions::from_target(target).map_err(|message| {
        PipelineError::ScriptError {
            path: source.to_path_buf(),
            message,
        }
    })?;

    let transformed =
        Transformer::new(&allocator, source, &options).build_with_scoping(scoping, &mut program);
    if !transformed.errors.is_empty() {
        return Err(script_error(source, &transformed.errors));
    }

    let code = Codegen::new().build(&program).code;
    debug!(path = ?source, target, bytes = code.len(), "script transformed");
    Ok(code)
}

fn script_error(path: &Path, diagnostics: &[OxcDiagnostic]) -> PipelineError {
    let message = diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    PipelineError::ScriptError {
        path: path.to_path_buf(),
        message,
    }
}
