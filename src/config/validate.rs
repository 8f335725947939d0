// src/config/validate.rs

use std::path::{Component, Path, PathBuf};

use globset::Glob;

use crate::config::model::{
    PathEntry, PipelineConfig, RawConfigFile, ScriptOptions, ServerConfig, StyleOptions,
    WatchConfig,
};
use crate::errors::{PipelineError, Result};
use crate::types::AssetGroup;

/// Script targets the transformer accepts.
pub const SUPPORTED_SCRIPT_TARGETS: &[&str] = &[
    "es2015", "es2016", "es2017", "es2018", "es2019", "es2020", "es2021", "es2022", "es2023",
    "es2024", "esnext",
];

impl TryFrom<RawConfigFile> for PipelineConfig {
    type Error = PipelineError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;

        let styles = resolve_entry(&raw, AssetGroup::Styles);
        let scripts = resolve_entry(&raw, AssetGroup::Scripts);
        let templates = resolve_entry(&raw, AssetGroup::Templates);

        let cfg = PipelineConfig::new_unchecked(
            PathBuf::from(&raw.dirs.src),
            PathBuf::from(&raw.dirs.dest),
            styles,
            scripts,
            templates,
            ServerConfig {
                host: raw.server.host,
                port: raw.server.port,
                index: raw.server.index,
                open: raw.server.open,
                cors: raw.server.cors,
            },
            WatchConfig {
                behaviour: raw.watch.triggered_while_running_behaviour,
                use_hash: raw.watch.use_hash,
            },
            StyleOptions {
                targets: raw.styles.targets,
                source_maps: raw.styles.source_maps,
            },
            ScriptOptions {
                target: raw.scripts.target.trim().to_lowercase(),
            },
        );

        validate_entries(&cfg)?;
        Ok(cfg)
    }
}

/// Run the checks that only need the raw file.
pub fn validate_config(raw: &RawConfigFile) -> Result<()> {
    ensure_non_empty("[dirs].src", &raw.dirs.src)?;
    ensure_non_empty("[dirs].dest", &raw.dirs.dest)?;
    ensure_non_empty("[server].index", &raw.server.index)?;
    validate_style_targets(raw)?;
    validate_script_target(raw)?;
    Ok(())
}

/// Layout derived from `[dirs]` for a group, before `[paths]` overrides.
fn default_entry(src_dir: &str, dest_dir: &str, group: AssetGroup) -> (String, String, String) {
    match group {
        AssetGroup::Styles => (
            format!("{src_dir}/styles/style.scss"),
            format!("{dest_dir}/styles"),
            format!("{src_dir}/styles/**/*.scss"),
        ),
        AssetGroup::Scripts => (
            format!("{src_dir}/scripts/script.js"),
            format!("{dest_dir}/scripts"),
            format!("{src_dir}/scripts/**/*.js"),
        ),
        AssetGroup::Templates => {
            let src = format!("{src_dir}/templates/index.html");
            (src.clone(), dest_dir.to_string(), src)
        }
    }
}

fn resolve_entry(raw: &RawConfigFile, group: AssetGroup) -> PathEntry {
    let (src, dest, watch) = default_entry(&raw.dirs.src, &raw.dirs.dest, group);
    let overrides = raw.paths.get(group);

    let src = overrides.and_then(|o| o.src.clone()).unwrap_or(src);
    let dest = overrides.and_then(|o| o.dest.clone()).unwrap_or(dest);
    // An overridden `src` without an explicit `watch` keeps the templates
    // rule of watching the source file itself.
    let watch = match overrides.and_then(|o| o.watch.clone()) {
        Some(w) => w,
        None if group == AssetGroup::Templates => src.clone(),
        None => watch,
    };
    let exclude = overrides.map(|o| o.exclude.clone()).unwrap_or_default();

    PathEntry {
        src: PathBuf::from(src),
        dest: PathBuf::from(dest),
        watch,
        exclude,
    }
}

fn validate_entries(cfg: &PipelineConfig) -> Result<()> {
    let source_root = normalize(cfg.source_root());

    for (group, entry) in cfg.entries() {
        if entry.src.as_os_str().is_empty() {
            return Err(PipelineError::ConfigError(format!(
                "[paths.{group}].src must not be empty"
            )));
        }
        if entry.src.file_name().is_none() {
            return Err(PipelineError::ConfigError(format!(
                "[paths.{group}].src must name a file (got {:?})",
                entry.src
            )));
        }
        if entry.dest.as_os_str().is_empty() {
            return Err(PipelineError::ConfigError(format!(
                "[paths.{group}].dest must not be empty"
            )));
        }
        ensure_non_empty(&format!("[paths.{group}].watch"), &entry.watch)?;

        for pattern in std::iter::once(&entry.watch).chain(entry.exclude.iter()) {
            Glob::new(pattern).map_err(|e| {
                PipelineError::ConfigError(format!(
                    "[paths.{group}] has an invalid glob pattern '{pattern}': {e}"
                ))
            })?;
        }

        // Only the source root is watched; anything outside it would never
        // trigger a rebuild.
        if !normalize(&entry.src).starts_with(&source_root) {
            return Err(PipelineError::ConfigError(format!(
                "[paths.{group}].src ({:?}) must lie inside the source root ({:?})",
                entry.src,
                cfg.source_root()
            )));
        }
        if !normalize(&literal_prefix(&entry.watch)).starts_with(&source_root) {
            return Err(PipelineError::ConfigError(format!(
                "[paths.{group}].watch ('{}') must lie inside the source root ({:?})",
                entry.watch,
                cfg.source_root()
            )));
        }

        // Writing into the watched tree would re-trigger the watcher forever.
        if normalize(&entry.dest).starts_with(&source_root) {
            return Err(PipelineError::ConfigError(format!(
                "[paths.{group}].dest ({:?}) must not lie inside the source root ({:?})",
                entry.dest,
                cfg.source_root()
            )));
        }
    }

    Ok(())
}

fn validate_style_targets(raw: &RawConfigFile) -> Result<()> {
    if raw.styles.targets.iter().all(|t| t.trim().is_empty()) {
        return Err(PipelineError::ConfigError(
            "[styles].targets must contain at least one browserslist query".to_string(),
        ));
    }
    Ok(())
}

fn validate_script_target(raw: &RawConfigFile) -> Result<()> {
    let target = raw.scripts.target.trim().to_lowercase();
    if !SUPPORTED_SCRIPT_TARGETS.contains(&target.as_str()) {
        return Err(PipelineError::ConfigError(format!(
            "[scripts].target '{}' is not supported (expected one of {})",
            raw.scripts.target,
            SUPPORTED_SCRIPT_TARGETS.join(", ")
        )));
    }
    Ok(())
}

fn ensure_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PipelineError::ConfigError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

/// Lexically drop `.` components so `./build` and `build` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Leading path components of a glob that contain no glob syntax.
fn literal_prefix(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .take_while(|c| {
            !c.as_os_str()
                .to_string_lossy()
                .contains(['*', '?', '[', '{'])
        })
        .collect()
}
