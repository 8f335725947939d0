use std::path::{Path, PathBuf};

use assetpipe::config::{PipelineConfig, RawConfigFile, load_and_validate, load_or_default};
use assetpipe::errors::PipelineError;
use assetpipe::types::{AssetGroup, TriggerWhileRunningBehaviour};
use assetpipe_test_utils::builders::ConfigBuilder;
use tempfile::tempdir;

fn parse(toml_src: &str) -> RawConfigFile {
    toml::from_str(toml_src).expect("valid TOML")
}

#[test]
fn test_defaults_derive_layout_from_dirs() {
    let cfg = PipelineConfig::try_from(RawConfigFile::default()).unwrap();

    assert_eq!(cfg.entry(AssetGroup::Styles).src, PathBuf::from("src/styles/style.scss"));
    assert_eq!(cfg.entry(AssetGroup::Styles).dest, PathBuf::from("build/styles"));
    assert_eq!(cfg.entry(AssetGroup::Styles).watch, "src/styles/**/*.scss");

    assert_eq!(cfg.entry(AssetGroup::Scripts).src, PathBuf::from("src/scripts/script.js"));
    assert_eq!(cfg.entry(AssetGroup::Scripts).dest, PathBuf::from("build/scripts"));
    assert_eq!(cfg.entry(AssetGroup::Scripts).watch, "src/scripts/**/*.js");

    let templates = cfg.entry(AssetGroup::Templates);
    assert_eq!(templates.src, PathBuf::from("src/templates/index.html"));
    assert_eq!(templates.dest, PathBuf::from("build"));
    assert_eq!(templates.watch, "src/templates/index.html");

    assert_eq!(cfg.server.host, "127.0.0.1");
    assert_eq!(cfg.server.port, 8083);
    assert_eq!(cfg.server.index, "index.html");
    assert!(cfg.server.open);
    assert!(cfg.server.cors);
    assert_eq!(cfg.watch.behaviour, TriggerWhileRunningBehaviour::Queue);
    assert!(!cfg.watch.use_hash);
    assert_eq!(cfg.script.target, "es2015");
    assert!(cfg.style.source_maps);
}

#[test]
fn test_dirs_and_paths_overrides() {
    let raw = parse(
        r#"
        [dirs]
        src = "assets"
        dest = "public"

        [paths.scripts]
        src = "assets/js/app.js"
        dest = "public/js"
        exclude = ["assets/js/vendor/**"]

        [paths.templates]
        src = "assets/pages/home.html"

        [watch]
        triggered_while_running_behaviour = "parallel"
        use_hash = true

        [server]
        port = 9000
        open = false
        "#,
    );
    let cfg = PipelineConfig::try_from(raw).unwrap();

    assert_eq!(cfg.source_root(), Path::new("assets"));
    assert_eq!(cfg.entry(AssetGroup::Styles).src, PathBuf::from("assets/styles/style.scss"));
    assert_eq!(cfg.entry(AssetGroup::Scripts).dest, PathBuf::from("public/js"));
    // watch keeps the [dirs]-derived default when only src/dest change.
    assert_eq!(cfg.entry(AssetGroup::Scripts).watch, "assets/scripts/**/*.js");
    assert_eq!(cfg.entry(AssetGroup::Scripts).exclude, vec!["assets/js/vendor/**".to_string()]);
    // Templates watch follows an overridden src.
    assert_eq!(cfg.entry(AssetGroup::Templates).watch, "assets/pages/home.html");
    assert_eq!(cfg.watch.behaviour, TriggerWhileRunningBehaviour::Parallel);
    assert!(cfg.watch.use_hash);
    assert_eq!(cfg.server.port, 9000);
    assert!(!cfg.server.open);
}

#[test]
fn test_paths_resolve_against_root() {
    let cfg = ConfigBuilder::new("/project").build();

    assert_eq!(
        cfg.source_path(AssetGroup::Styles),
        PathBuf::from("/project/src/styles/style.scss")
    );
    assert_eq!(cfg.dest_path(AssetGroup::Templates), PathBuf::from("/project/build"));
    assert_eq!(cfg.dest_dir(), PathBuf::from("/project/build"));
    assert_eq!(cfg.source_dir(), PathBuf::from("/project/src"));
}

#[test]
fn test_unknown_key_is_rejected() {
    let result: Result<RawConfigFile, _> = toml::from_str("[server]\nprot = 1\n");
    assert!(result.is_err());
}

#[test]
fn test_dest_inside_source_root_is_rejected() {
    let raw = parse(
        r#"
        [paths.styles]
        dest = "./src/out"
        "#,
    );
    let err = PipelineConfig::try_from(raw).unwrap_err();
    assert!(matches!(err, PipelineError::ConfigError(ref msg) if msg.contains("source root")));
}

#[test]
fn test_src_outside_source_root_is_rejected() {
    // Only the source root is watched, so this template could never rebuild.
    let raw = parse(
        r#"
        [paths.templates]
        src = "pages/index.html"
        "#,
    );
    let err = PipelineConfig::try_from(raw).unwrap_err();
    assert!(
        matches!(err, PipelineError::ConfigError(ref msg) if msg.contains("[paths.templates].src") && msg.contains("source root")),
        "unexpected error: {err}"
    );
}

#[test]
fn test_watch_glob_outside_source_root_is_rejected() {
    let raw = parse(
        r#"
        [paths.styles]
        watch = "other/**/*.scss"
        "#,
    );
    let err = PipelineConfig::try_from(raw).unwrap_err();
    assert!(
        matches!(err, PipelineError::ConfigError(ref msg) if msg.contains("[paths.styles].watch")),
        "unexpected error: {err}"
    );
}

#[test]
fn test_watch_glob_with_dot_prefix_inside_source_root_is_accepted() {
    let raw = parse(
        r#"
        [paths.styles]
        watch = "./src/**/*.scss"
        "#,
    );
    assert!(PipelineConfig::try_from(raw).is_ok());
}

#[test]
fn test_invalid_glob_is_rejected() {
    let raw = parse(
        r#"
        [paths.styles]
        watch = "src/styles/[*.scss"
        "#,
    );
    assert!(matches!(
        PipelineConfig::try_from(raw),
        Err(PipelineError::ConfigError(_))
    ));
}

#[test]
fn test_unsupported_script_target_is_rejected() {
    let raw = parse("[scripts]\ntarget = \"es5\"\n");
    let err = PipelineConfig::try_from(raw).unwrap_err();
    assert!(err.to_string().contains("es5"));
}

#[test]
fn test_empty_style_targets_are_rejected() {
    let raw = parse("[styles]\ntargets = []\n");
    assert!(matches!(
        PipelineConfig::try_from(raw),
        Err(PipelineError::ConfigError(_))
    ));
}

#[test]
fn test_load_and_validate_roots_at_config_dir() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Assetpipe.toml");
    std::fs::write(&path, "[server]\nport = 8100\n").unwrap();

    let cfg = load_and_validate(&path).unwrap();
    assert_eq!(cfg.root(), dir.path());
    assert_eq!(cfg.server.port, 8100);
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Assetpipe.toml");

    let cfg = load_or_default(&path).unwrap();
    assert_eq!(cfg.root(), dir.path());
    assert_eq!(cfg.server.port, 8083);
}

#[test]
fn test_malformed_config_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Assetpipe.toml");
    std::fs::write(&path, "[server\nport = ").unwrap();

    assert!(matches!(
        load_or_default(&path),
        Err(PipelineError::TomlError(_))
    ));
}
