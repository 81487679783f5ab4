//! File system helpers for deploying build output

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

#[derive(Debug, Default, Clone)]
pub struct CopyOptions {
    /// Entry names skipped at any depth
    pub exclude: Vec<String>,
}

impl CopyOptions {
    pub fn exclude_git() -> Self {
        Self {
            exclude: vec![".git".to_string()],
        }
    }

    fn is_excluded(&self, name: &std::ffi::OsStr) -> bool {
        self.exclude
            .iter()
            .any(|excluded| name.to_str() == Some(excluded.as_str()))
    }
}

/// Copy `src` into `dst` recursively, overwriting existing files
///
/// Returns the number of files copied.
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2, options: &CopyOptions) -> io::Result<usize>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src = src.as_ref();
    let dst = dst.as_ref();
    fs::create_dir_all(dst)?;

    let mut copied = 0;
    let walker = WalkDir::new(src)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !options.is_excluded(e.file_name()));

    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry.path().strip_prefix(src).map_err(io::Error::other)?;
        let dst_path = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst_path)?;
        } else {
            if let Some(parent) = dst_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dst_path)?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{create_temp_dir, write_file};

    #[test]
    fn test_copy_preserves_layout() {
        let src = create_temp_dir();
        let dst = create_temp_dir();
        write_file(src.path(), "app.js", "a");
        write_file(src.path(), "lib/util.js", "b");

        let copied = copy_dir_recursive(src.path(), dst.path().join("dist"), &CopyOptions::default())
            .unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(dst.path().join("dist/lib/util.js")).unwrap(),
            "b"
        );
    }

    #[test]
    fn test_copy_skips_git_directory() {
        let src = create_temp_dir();
        let dst = create_temp_dir();
        write_file(src.path(), ".git/HEAD", "ref: refs/heads/main");
        write_file(src.path(), "app.js", "a");

        copy_dir_recursive(src.path(), dst.path(), &CopyOptions::exclude_git()).unwrap();

        assert!(dst.path().join("app.js").exists());
        assert!(!dst.path().join(".git").exists());
    }

    #[test]
    fn test_copy_overwrites_existing_files() {
        let src = create_temp_dir();
        let dst = create_temp_dir();
        write_file(src.path(), "app.js", "new");
        write_file(dst.path(), "app.js", "old");

        copy_dir_recursive(src.path(), dst.path(), &CopyOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(dst.path().join("app.js")).unwrap(), "new");
    }
}
