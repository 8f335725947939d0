#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const STYLE_SCSS: &str = "$accent: red;\n\nbody {\n  color: $accent;\n}\n";
pub const SCRIPT_JS: &str = "const greet = (name) => `hello ${name ?? 'world'}`;\nconsole.log(greet());\n";
pub const INDEX_HTML: &str =
    "<!doctype html>\n<html>\n<head><title>fixture</title></head>\n<body>\n<h1>hi</h1>\n</body>\n</html>\n";

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    fs::write(&path, contents).expect("write fixture file");
}

/// Lay out the default project: `src/styles/style.scss`,
/// `src/scripts/script.js` and `src/templates/index.html`.
pub fn write_default_project(root: &Path) {
    write_file(root, "src/styles/style.scss", STYLE_SCSS);
    write_file(root, "src/scripts/script.js", SCRIPT_JS);
    write_file(root, "src/templates/index.html", INDEX_HTML);
}
