//! Common test utilities for noin integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A working directory plus an isolated temp root for one noin run
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Directory noin runs in
    pub path: PathBuf,
    /// Value of `NOIN_TEMP_DIR`
    pub temp_root: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("work");
        let temp_root = temp.path().join("tmp");
        std::fs::create_dir_all(&path).expect("Failed to create work directory");
        std::fs::create_dir_all(&temp_root).expect("Failed to create temp root");
        Self {
            temp,
            path,
            temp_root,
        }
    }

    /// Write a file in the working directory
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// `noin` started in the working directory with the isolated temp root
    #[allow(deprecated)]
    pub fn noin(&self) -> Command {
        let mut cmd = Command::cargo_bin("noin").expect("noin binary");
        cmd.current_dir(&self.path)
            .env("NOIN_TEMP_DIR", &self.temp_root)
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
