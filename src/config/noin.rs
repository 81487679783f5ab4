//! Root configuration record (`.noin.json`)

use serde::{Deserialize, Serialize};

use super::platform::{LinuxConfig, WindowsConfig};
use crate::error::{Result, config};

/// GitHub coordinates of the repository to deploy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,

    /// Derived from the user and repository names; any stored value is ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl GitConfig {
    /// Clone URL for a GitHub user and repository
    pub fn github_url(user_name: &str, repository_name: &str) -> String {
        format!("https://github.com/{user_name}/{repository_name}.git")
    }
}

/// The full installer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoinConfig {
    /// Build and install in production mode
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "production")]
    pub is_production: Option<bool>,

    /// Allow deleting an existing temp clone without asking
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "override")]
    pub override_existing: Option<bool>,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_commands: Vec<String>,

    /// Dependency install command run in the clone (default `npm install`)
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "InstallScript")]
    pub install_script: Option<String>,

    /// Build command run in the clone (default `npm run build`)
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "BuildScript")]
    pub build_script: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux: Option<LinuxConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "win32")]
    pub windows: Option<WindowsConfig>,
}

impl NoinConfig {
    /// Parse a configuration document; `path` is only used in errors
    pub fn from_json(path: &str, json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| config::parse_failed(path, e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| config::invalid(format!("cannot serialize configuration: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_url() {
        assert_eq!(
            GitConfig::github_url("bar", "foo"),
            "https://github.com/bar/foo.git"
        );
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = NoinConfig::from_json(".noin.json", "{}").unwrap();
        assert_eq!(config, NoinConfig::default());
    }

    #[test]
    fn test_reads_nested_platform_document() {
        let json = r#"{
            "isProduction": true,
            "git": { "userName": "dotupNET", "repositoryName": "motobox" },
            "postCommands": ["echo ${targetPath}"],
            "linux": {
                "targetPath": "/opt/motobox",
                "service": { "serviceName": "motobox" }
            }
        }"#;

        let config = NoinConfig::from_json(".noin.json", json).unwrap();
        assert_eq!(config.is_production, Some(true));
        assert_eq!(config.git.repository_name.as_deref(), Some("motobox"));
        assert_eq!(config.post_commands, vec!["echo ${targetPath}"]);
        assert!(config.windows.is_none());
        let linux = config.linux.unwrap();
        assert_eq!(linux.target.target_path.as_deref(), Some("/opt/motobox"));
        assert!(linux.service.is_some());
    }

    #[test]
    fn test_reads_legacy_root_keys() {
        let json = r#"{ "production": false, "override": true, "win32": { "targetPath": "C:\\apps\\x" } }"#;

        let config = NoinConfig::from_json(".noin.json", json).unwrap();
        assert_eq!(config.is_production, Some(false));
        assert_eq!(config.override_existing, Some(true));
        assert_eq!(
            config.windows.unwrap().target.target_path.as_deref(),
            Some("C:\\apps\\x")
        );
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = NoinConfig::from_json("/work/.noin.json", "{ not json").unwrap_err();
        assert!(err.to_string().contains("/work/.noin.json"));
    }

    #[test]
    fn test_serializes_only_populated_fields() {
        let config = NoinConfig {
            is_production: Some(true),
            ..NoinConfig::default()
        };
        let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(value["isProduction"], true);
        assert!(value.get("linux").is_none());
        assert!(value.get("postCommands").is_none());
    }
}
