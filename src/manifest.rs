//! Package manifest (`package.json`) entry point lookup

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{NoinError, Result};

pub const MANIFEST_FILE: &str = "package.json";

/// The parts of `package.json` the installer reads
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    bin: Option<Value>,
    #[serde(default)]
    main: Option<String>,
}

impl PackageManifest {
    /// Read `dir/package.json`
    pub fn read(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|e| NoinError::ManifestReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| NoinError::ManifestReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Declared entry point relative to the package root
    ///
    /// `bin` as a string, else the first entry of a `bin` map, else `main`.
    pub fn entry_point(&self) -> Result<&str> {
        let bin = match &self.bin {
            Some(Value::String(bin)) => Some(bin.as_str()),
            Some(Value::Object(map)) => map.values().find_map(Value::as_str),
            _ => None,
        };

        bin.or(self.main.as_deref())
            .filter(|entry| !entry.is_empty())
            .ok_or_else(|| NoinError::ManifestInvalid {
                message: format!(
                    "package '{}' declares neither 'bin' nor 'main'",
                    self.name.as_deref().unwrap_or("<unnamed>")
                ),
            })
    }

    /// Entry point under `root`
    pub fn binary_path(&self, root: &Path) -> Result<PathBuf> {
        Ok(root.join(normalize(self.entry_point()?)))
    }

    /// Directory of the entry point relative to the package root (empty when
    /// the entry point sits at the root)
    pub fn executable_dir(&self) -> Result<PathBuf> {
        Ok(normalize(self.entry_point()?)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default())
    }
}

fn normalize(entry: &str) -> PathBuf {
    Path::new(entry.trim_start_matches("./")).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_string() {
        let manifest = PackageManifest::from_json(r#"{ "bin": "./dist/cli.js" }"#).unwrap();
        assert_eq!(manifest.entry_point().unwrap(), "./dist/cli.js");
        assert_eq!(
            manifest.binary_path(Path::new("/opt/app")).unwrap(),
            PathBuf::from("/opt/app/dist/cli.js")
        );
    }

    #[test]
    fn test_bin_map_uses_first_entry() {
        let manifest =
            PackageManifest::from_json(r#"{ "bin": { "motobox": "dist/app.js" }, "main": "index.js" }"#)
                .unwrap();
        assert_eq!(manifest.entry_point().unwrap(), "dist/app.js");
        assert_eq!(manifest.executable_dir().unwrap(), PathBuf::from("dist"));
    }

    #[test]
    fn test_main_fallback() {
        let manifest = PackageManifest::from_json(r#"{ "main": "index.js" }"#).unwrap();
        assert_eq!(manifest.entry_point().unwrap(), "index.js");
        assert_eq!(manifest.executable_dir().unwrap(), PathBuf::new());
    }

    #[test]
    fn test_missing_entry_point() {
        let manifest = PackageManifest::from_json(r#"{ "name": "empty" }"#).unwrap();
        let err = manifest.entry_point().unwrap_err();
        assert!(matches!(err, NoinError::ManifestInvalid { .. }));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_read_missing_file() {
        let temp = crate::test_fixtures::create_temp_dir();
        let err = PackageManifest::read(temp.path()).unwrap_err();
        assert!(matches!(err, NoinError::ManifestReadFailed { .. }));
    }

    #[test]
    fn test_read_from_directory() {
        let temp = crate::test_fixtures::create_temp_dir();
        crate::test_fixtures::create_node_project(temp.path());

        let manifest = PackageManifest::read(temp.path()).unwrap();

        assert_eq!(manifest.name.as_deref(), Some("motobox"));
        assert_eq!(manifest.entry_point().unwrap(), "dist/app.js");
    }
}
