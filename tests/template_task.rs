use std::fs;
use std::path::Path;

use assetpipe::errors::PipelineError;
use assetpipe::fs::mock::MockFileSystem;
use assetpipe::fs::{FileSystem, RealFileSystem};
use assetpipe::tasks::template::copy_templates;
use assetpipe_test_utils::builders::ConfigBuilder;
use assetpipe_test_utils::fixtures::{INDEX_HTML, write_file};
use tempfile::tempdir;

#[test]
fn test_template_is_copied_verbatim_and_idempotent() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "src/templates/index.html", INDEX_HTML);
    let cfg = ConfigBuilder::new(dir.path()).build();

    copy_templates(&cfg, &RealFileSystem).unwrap();
    let first = fs::read(dir.path().join("build/index.html")).unwrap();
    copy_templates(&cfg, &RealFileSystem).unwrap();
    let second = fs::read(dir.path().join("build/index.html")).unwrap();

    assert_eq!(first, INDEX_HTML.as_bytes());
    assert_eq!(first, second);
}

#[test]
fn test_template_copy_through_mock_fs() {
    let fs = MockFileSystem::new();
    fs.add_file("/project/src/templates/index.html", b"<p>\xF0\x9F\x98\x80</p>".to_vec());
    let cfg = ConfigBuilder::new("/project").build();

    let outputs = copy_templates(&cfg, &fs).unwrap();

    assert_eq!(outputs, vec![Path::new("/project/build/index.html").to_path_buf()]);
    assert_eq!(
        fs.read(Path::new("/project/build/index.html")).unwrap(),
        b"<p>\xF0\x9F\x98\x80</p>".to_vec()
    );
}

#[test]
fn test_missing_template_fails() {
    let fs = MockFileSystem::new();
    let cfg = ConfigBuilder::new("/project").build();

    assert!(matches!(
        copy_templates(&cfg, &fs),
        Err(PipelineError::MissingSource(p)) if p == Path::new("/project/src/templates/index.html")
    ));
}
