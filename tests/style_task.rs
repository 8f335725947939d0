use std::fs;

use assetpipe::errors::PipelineError;
use assetpipe::fs::RealFileSystem;
use assetpipe::tasks::style::compile_styles;
use assetpipe_test_utils::builders::ConfigBuilder;
use assetpipe_test_utils::fixtures::write_file;
use tempfile::tempdir;

#[test]
fn test_compiles_scss_with_external_source_map() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "src/styles/style.scss", "$c: red;\nbody { color: $c; }\n");
    let cfg = ConfigBuilder::new(dir.path()).build();

    let outputs = compile_styles(&cfg, &RealFileSystem).unwrap();

    let css_path = dir.path().join("build/styles/style.css");
    let map_path = dir.path().join("build/styles/style.css.map");
    assert_eq!(outputs, vec![css_path.clone(), map_path.clone()]);

    let css = fs::read_to_string(&css_path).unwrap();
    assert!(css.contains("color: red"), "css was: {css}");
    assert!(css.contains("sourceMappingURL=style.css.map"));

    let map = fs::read_to_string(&map_path).unwrap();
    assert!(map.contains("style.scss"), "map was: {map}");
    assert!(map.contains("\"mappings\""));
}

#[test]
fn test_partials_are_resolved() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "src/styles/_vars.scss", "$accent: #336699;\n");
    write_file(
        dir.path(),
        "src/styles/style.scss",
        "@import 'vars';\na { color: $accent; }\n",
    );
    let cfg = ConfigBuilder::new(dir.path()).build();

    compile_styles(&cfg, &RealFileSystem).unwrap();

    let css = fs::read_to_string(dir.path().join("build/styles/style.css")).unwrap();
    assert!(css.contains("#369") || css.contains("#336699"), "css was: {css}");
}

#[test]
fn test_vendor_prefixes_follow_targets() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "src/styles/style.scss", ".card { user-select: none; }\n");
    let cfg = ConfigBuilder::new(dir.path())
        .style_targets(&["safari 12"])
        .build();

    compile_styles(&cfg, &RealFileSystem).unwrap();

    let css = fs::read_to_string(dir.path().join("build/styles/style.css")).unwrap();
    assert!(css.contains("-webkit-user-select: none"), "css was: {css}");
}

#[test]
fn test_source_maps_can_be_disabled() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "src/styles/style.scss", "p { margin: 0; }\n");
    let cfg = ConfigBuilder::new(dir.path()).source_maps(false).build();

    let outputs = compile_styles(&cfg, &RealFileSystem).unwrap();

    assert_eq!(outputs.len(), 1);
    let css = fs::read_to_string(&outputs[0]).unwrap();
    assert!(!css.contains("sourceMappingURL"));
    assert!(!dir.path().join("build/styles/style.css.map").exists());
}

#[test]
fn test_malformed_scss_fails_with_compiler_message() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "src/styles/style.scss", "body { color: ;\n");
    let cfg = ConfigBuilder::new(dir.path()).build();

    let err = compile_styles(&cfg, &RealFileSystem).unwrap_err();
    match err {
        PipelineError::StyleError { path, message } => {
            assert!(path.ends_with("src/styles/style.scss"));
            assert!(!message.is_empty());
        }
        other => panic!("expected StyleError, got {other:?}"),
    }
    assert!(!dir.path().join("build/styles/style.css").exists());
}

#[test]
fn test_missing_entry_fails() {
    let dir = tempdir().unwrap();
    let cfg = ConfigBuilder::new(dir.path()).build();

    let err = compile_styles(&cfg, &RealFileSystem).unwrap_err();
    assert!(matches!(err, PipelineError::MissingSource(p) if p.ends_with("style.scss")));
}
