#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use assetpipe::config::{PathEntryConfig, PipelineConfig, RawConfigFile};
use assetpipe::types::{AssetGroup, TriggerWhileRunningBehaviour};

/// Builder for `PipelineConfig` to simplify test setup.
///
/// Starts from the built-in defaults, but never opens a browser and binds
/// an ephemeral port.
pub struct ConfigBuilder {
    raw: RawConfigFile,
    root: PathBuf,
}

impl ConfigBuilder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let mut raw = RawConfigFile::default();
        raw.server.port = 0;
        raw.server.open = false;
        Self {
            raw,
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn dirs(mut self, src: &str, dest: &str) -> Self {
        self.raw.dirs.src = src.to_string();
        self.raw.dirs.dest = dest.to_string();
        self
    }

    pub fn entry(mut self, group: AssetGroup, entry: PathEntryConfig) -> Self {
        let slot = match group {
            AssetGroup::Styles => &mut self.raw.paths.styles,
            AssetGroup::Scripts => &mut self.raw.paths.scripts,
            AssetGroup::Templates => &mut self.raw.paths.templates,
        };
        *slot = Some(entry);
        self
    }

    pub fn exclude(mut self, group: AssetGroup, pattern: &str) -> Self {
        let slot = match group {
            AssetGroup::Styles => &mut self.raw.paths.styles,
            AssetGroup::Scripts => &mut self.raw.paths.scripts,
            AssetGroup::Templates => &mut self.raw.paths.templates,
        };
        slot.get_or_insert_with(PathEntryConfig::default)
            .exclude
            .push(pattern.to_string());
        self
    }

    pub fn behaviour(mut self, behaviour: TriggerWhileRunningBehaviour) -> Self {
        self.raw.watch.triggered_while_running_behaviour = behaviour;
        self
    }

    pub fn use_hash(mut self, val: bool) -> Self {
        self.raw.watch.use_hash = val;
        self
    }

    pub fn style_targets(mut self, targets: &[&str]) -> Self {
        self.raw.styles.targets = targets.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn source_maps(mut self, val: bool) -> Self {
        self.raw.styles.source_maps = val;
        self
    }

    pub fn script_target(mut self, target: &str) -> Self {
        self.raw.scripts.target = target.to_string();
        self
    }

    pub fn cors(mut self, val: bool) -> Self {
        self.raw.server.cors = val;
        self
    }

    pub fn index(mut self, index: &str) -> Self {
        self.raw.server.index = index.to_string();
        self
    }

    /// The raw (unvalidated) file contents.
    pub fn raw(self) -> RawConfigFile {
        self.raw
    }

    pub fn build(self) -> PipelineConfig {
        PipelineConfig::try_from(self.raw)
            .expect("Failed to build valid config from builder")
            .with_root(self.root)
    }

    pub fn build_arc(self) -> Arc<PipelineConfig> {
        Arc::new(self.build())
    }
}
