//! Test fixtures shared by the unit tests.
//!
//! Temp directories come from `crate::temp::temp_dir_base()` so they are never
//! created under the current working directory.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Write `content` to `dir/relative`, creating parent directories.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

/// Lay out a minimal built Node.js project: `package.json` with a `bin`
/// entry pointing at `dist/app.js`, plus the built file.
///
/// # Panics
///
/// Panics if the files cannot be written.
pub fn create_node_project(dir: &Path) {
    write_file(
        dir,
        "package.json",
        r#"{ "name": "motobox", "version": "1.0.0", "bin": { "motobox": "dist/app.js" } }"#,
    );
    write_file(dir, "dist/app.js", "console.log('motobox');\n");
}
