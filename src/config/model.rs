// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::{AssetGroup, TriggerWhileRunningBehaviour};

/// Default live server port.
pub const DEFAULT_PORT: u16 = 8083;
/// Default source root.
pub const DEFAULT_SRC_DIR: &str = "src";
/// Default destination root.
pub const DEFAULT_DEST_DIR: &str = "build";

/// Top-level configuration as read from a TOML file.
///
/// Every section is optional; an empty file (or no file at all) yields the
/// built-in layout:
///
/// ```toml
/// [dirs]
/// src = "src"
/// dest = "build"
///
/// [paths.styles]
/// src = "src/styles/style.scss"
/// dest = "build/styles"
/// watch = "src/styles/**/*.scss"
///
/// [server]
/// port = 8083
/// index = "index.html"
/// ```
///
/// Use [`PipelineConfig::try_from`] to validate and resolve defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub dirs: DirsSection,

    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub styles: StylesSection,

    #[serde(default)]
    pub scripts: ScriptsSection,
}

/// `[dirs]` section. Group defaults are derived from these two roots.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirsSection {
    #[serde(default = "default_src_dir")]
    pub src: String,

    #[serde(default = "default_dest_dir")]
    pub dest: String,
}

fn default_src_dir() -> String {
    DEFAULT_SRC_DIR.to_string()
}

fn default_dest_dir() -> String {
    DEFAULT_DEST_DIR.to_string()
}

impl Default for DirsSection {
    fn default() -> Self {
        Self {
            src: default_src_dir(),
            dest: default_dest_dir(),
        }
    }
}

/// `[paths.<group>]` overrides. Missing groups, and missing fields within a
/// group, fall back to the layout derived from `[dirs]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    #[serde(default)]
    pub styles: Option<PathEntryConfig>,

    #[serde(default)]
    pub scripts: Option<PathEntryConfig>,

    #[serde(default)]
    pub templates: Option<PathEntryConfig>,
}

impl PathsSection {
    pub fn get(&self, group: AssetGroup) -> Option<&PathEntryConfig> {
        match group {
            AssetGroup::Styles => self.styles.as_ref(),
            AssetGroup::Scripts => self.scripts.as_ref(),
            AssetGroup::Templates => self.templates.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathEntryConfig {
    #[serde(default)]
    pub src: Option<String>,

    #[serde(default)]
    pub dest: Option<String>,

    #[serde(default)]
    pub watch: Option<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    /// `0` binds an ephemeral port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// File served for `/`, relative to the destination root.
    #[serde(default = "default_index")]
    pub index: String,

    /// Open a browser once the server is listening.
    #[serde(default = "default_true")]
    pub open: bool,

    /// Allow cross-origin requests.
    #[serde(default = "default_true")]
    pub cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_index() -> String {
    "index.html".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            index: default_index(),
            open: true,
            cors: true,
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    #[serde(default)]
    pub triggered_while_running_behaviour: TriggerWhileRunningBehaviour,

    /// Skip triggers whose file content did not actually change.
    #[serde(default)]
    pub use_hash: bool,
}

/// `[styles]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StylesSection {
    /// Browserslist queries used for vendor prefixing.
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,

    #[serde(default = "default_true")]
    pub source_maps: bool,
}

fn default_targets() -> Vec<String> {
    vec!["defaults".to_string()]
}

impl Default for StylesSection {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            source_maps: true,
        }
    }
}

/// `[scripts]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptsSection {
    /// ECMAScript level the output must run on (`es2015` .. `es2024`, `esnext`).
    #[serde(default = "default_script_target")]
    pub target: String,
}

fn default_script_target() -> String {
    "es2015".to_string()
}

impl Default for ScriptsSection {
    fn default() -> Self {
        Self {
            target: default_script_target(),
        }
    }
}

/// Source, destination and watch glob for one asset group.
///
/// All paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub src: PathBuf,
    pub dest: PathBuf,
    pub watch: String,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub index: String,
    pub open: bool,
    pub cors: bool,
}

#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub behaviour: TriggerWhileRunningBehaviour,
    pub use_hash: bool,
}

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub targets: Vec<String>,
    pub source_maps: bool,
}

#[derive(Debug, Clone)]
pub struct ScriptOptions {
    pub target: String,
}

/// Validated, immutable pipeline configuration.
///
/// Built once at startup and shared (usually behind an `Arc`) by every task
/// and orchestrator. There is no global configuration state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    root: PathBuf,
    source_root: PathBuf,
    dest_root: PathBuf,
    styles: PathEntry,
    scripts: PathEntry,
    templates: PathEntry,
    pub server: ServerConfig,
    pub watch: WatchConfig,
    pub style: StyleOptions,
    pub script: ScriptOptions,
}

impl PipelineConfig {
    /// Construct a config without running validation.
    ///
    /// Prefer `PipelineConfig::try_from(raw)`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_unchecked(
        source_root: PathBuf,
        dest_root: PathBuf,
        styles: PathEntry,
        scripts: PathEntry,
        templates: PathEntry,
        server: ServerConfig,
        watch: WatchConfig,
        style: StyleOptions,
        script: ScriptOptions,
    ) -> Self {
        Self {
            root: PathBuf::from("."),
            source_root,
            dest_root,
            styles,
            scripts,
            templates,
            server,
            watch,
            style,
            script,
        }
    }

    /// Re-anchor every relative path at `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Project root all entries are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source root as configured (relative to the project root).
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Absolute-or-rooted source directory to watch.
    pub fn source_dir(&self) -> PathBuf {
        self.resolve(&self.source_root)
    }

    /// Directory the live server serves.
    pub fn dest_dir(&self) -> PathBuf {
        self.resolve(&self.dest_root)
    }

    pub fn entry(&self, group: AssetGroup) -> &PathEntry {
        match group {
            AssetGroup::Styles => &self.styles,
            AssetGroup::Scripts => &self.scripts,
            AssetGroup::Templates => &self.templates,
        }
    }

    /// Entries in build order.
    pub fn entries(&self) -> impl Iterator<Item = (AssetGroup, &PathEntry)> {
        AssetGroup::ALL.into_iter().map(|g| (g, self.entry(g)))
    }

    /// Source file for `group`, anchored at the project root.
    pub fn source_path(&self, group: AssetGroup) -> PathBuf {
        self.resolve(&self.entry(group).src)
    }

    /// Destination directory for `group`, anchored at the project root.
    pub fn dest_path(&self, group: AssetGroup) -> PathBuf {
        self.resolve(&self.entry(group).dest)
    }

    fn resolve(&self, rel: &Path) -> PathBuf {
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.root.join(rel)
        }
    }
}
