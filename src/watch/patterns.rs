// src/watch/patterns.rs

use std::fmt;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::PipelineConfig;
use crate::errors::{PipelineError, Result};
use crate::types::AssetGroup;

use super::path_utils::normalize_pattern;

/// Compiled watch/exclude globs for one asset group.
///
/// Patterns are relative to the project root; the watcher passes relative
/// paths (e.g. `"src/styles/_vars.scss"`) into `matches`.
#[derive(Clone)]
pub struct WatchProfile {
    group: AssetGroup,
    watch_set: GlobSet,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for WatchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchProfile")
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

impl WatchProfile {
    /// Compile a profile from a watch glob and exclude globs.
    pub fn new(group: AssetGroup, watch: &str, exclude: &[String]) -> Result<Self> {
        let watch_set = build_globset(group, &[watch.to_string()])?;
        let exclude_set = if exclude.is_empty() {
            None
        } else {
            Some(build_globset(group, exclude)?)
        };

        Ok(Self {
            group,
            watch_set,
            exclude_set,
        })
    }

    pub fn group(&self) -> AssetGroup {
        self.group
    }

    /// True if a change at `rel_path` (relative to the project root) should
    /// trigger this group.
    pub fn matches(&self, rel_path: &str) -> bool {
        if !self.watch_set.is_match(rel_path) {
            return false;
        }
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

/// One profile per group, in build order.
pub fn build_profiles(config: &PipelineConfig) -> Result<Vec<WatchProfile>> {
    config
        .entries()
        .map(|(group, entry)| WatchProfile::new(group, &entry.watch, &entry.exclude))
        .collect()
}

fn build_globset(group: AssetGroup, patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(normalize_pattern(pat)).map_err(|e| {
            PipelineError::ConfigError(format!("invalid glob pattern for {group}: {pat}: {e}"))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| PipelineError::ConfigError(format!("building globset for {group}: {e}")))
}
