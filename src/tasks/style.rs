// src/tasks/style.rs

//! Stylesheet task: SCSS → CSS → vendor-prefixed CSS + external source map.
//!
//! `grass` compiles the entry (resolving `@import`/`@use` through the
//! crate's [`FileSystem`]), then `lightningcss` re-parses the result,
//! lowers/prefixes it for the configured browserslist targets and prints it
//! together with a source map whose `sources` points at the original entry.

use std::path::{Path, PathBuf};

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use parcel_sourcemap::SourceMap;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::config::model::StyleOptions;
use crate::errors::{PipelineError, Result};
use crate::fs::{FileSystem, GrassFs};
use crate::types::AssetGroup;

use super::{file_name_of, require_source};

/// Compiled stylesheet ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStyle {
    pub css: String,
    pub source_map: Option<String>,
}

/// Compile the configured stylesheet entry into its destination directory.
///
/// Writes `<stem>.css` and, unless source maps are disabled,
/// `<stem>.css.map`. Returns the written paths.
pub fn compile_styles(config: &PipelineConfig, fs: &dyn FileSystem) -> Result<Vec<PathBuf>> {
    let source = config.source_path(AssetGroup::Styles);
    let dest_dir = config.dest_path(AssetGroup::Styles);

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "style".to_string());
    let css_name = format!("{stem}.css");
    let map_name = format!("{css_name}.map");

    let compiled = compile_stylesheet(fs, &source, &config.style, &map_name)?;

    let css_path = dest_dir.join(&css_name);
    fs.write(&css_path, compiled.css.as_bytes())?;
    let mut outputs = vec![css_path];

    if let Some(map) = compiled.source_map {
        let map_path = dest_dir.join(&map_name);
        fs.write(&map_path, map.as_bytes())?;
        outputs.push(map_path);
    }

    info!(group = %AssetGroup::Styles, ?outputs, "styles compiled");
    Ok(outputs)
}

/// Compile one stylesheet without writing anything.
///
/// `map_name` is the file name referenced by the `sourceMappingURL` trailer.
pub fn compile_stylesheet(
    fs: &dyn FileSystem,
    source: &Path,
    options: &StyleOptions,
    map_name: &str,
) -> Result<CompiledStyle> {
    require_source(fs, source)?;

    let original = fs.read_to_string(source)?;
    let compiled = compile_scss(fs, source)?;
    debug!(path = ?source, bytes = compiled.len(), "scss compiled");

    let source_name = file_name_of(source)?.to_string_lossy().into_owned();
    let targets = browser_targets(source, &options.targets)?;

    let mut stylesheet = StyleSheet::parse(
        &compiled,
        ParserOptions {
            filename: source_name.clone(),
            ..ParserOptions::default()
        },
    )
    .map_err(|e| style_error(source, e))?;

    stylesheet
        .minify(MinifyOptions {
            targets,
            ..MinifyOptions::default()
        })
        .map_err(|e| style_error(source, e))?;

    if !options.source_maps {
        let printed = stylesheet
            .to_css(PrinterOptions {
                targets,
                ..PrinterOptions::default()
            })
            .map_err(|e| style_error(source, e))?;
        return Ok(CompiledStyle {
            css: printed.code,
            source_map: None,
        });
    }

    let mut map = SourceMap::new("/");
    map.add_source(&source_name);
    map.set_source_content(0, &original)
        .map_err(|e| style_error(source, format!("{e:?}")))?;

    let printed = stylesheet
        .to_css(PrinterOptions {
            targets,
            source_map: Some(&mut map),
            ..PrinterOptions::default()
        })
        .map_err(|e| style_error(source, e))?;

    let map_json = map
        .to_json(None)
        .map_err(|e| style_error(source, format!("{e:?}")))?;

    let mut css = printed.code;
    if !css.ends_with('\n') {
        css.push('\n');
    }
    css.push_str(&format!("/*# sourceMappingURL={map_name} */\n"));

    Ok(CompiledStyle {
        css,
        source_map: Some(map_json),
    })
}

fn compile_scss(fs: &dyn FileSystem, source: &Path) -> Result<String> {
    let adapter = GrassFs(fs);
    let options = grass::Options::default()
        .fs(&adapter)
        .style(grass::OutputStyle::Expanded);

    grass::from_path(source, &options).map_err(|e| style_error(source, e))
}

fn browser_targets(source: &Path, queries: &[String]) -> Result<Targets> {
    let browsers = Browsers::from_browserslist(queries.iter().map(String::as_str))
        .map_err(|e| style_error(source, e))?;
    Ok(Targets {
        browsers,
        ..Targets::default()
    })
}

fn style_error(path: &Path, message: impl std::fmt::Display) -> PipelineError {
    PipelineError::StyleError {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
