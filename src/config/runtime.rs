//! Runtime records for the two install modes
//!
//! An app install only needs a [`RuntimeConfig`]; a systemd service extends it
//! with the unit fields in [`ServiceConfig`].

use serde::{Deserialize, Serialize};

/// Environment and startup data shared by app and service installs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Lines written verbatim to the `.env` file
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        alias = "Environment",
        alias = "environment"
    )]
    pub environment_lines: Vec<String>,

    /// Post commands for this platform, replacing the root list when present
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_commands: Vec<String>,

    /// Command line that starts the deployed program
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "ExecStart")]
    pub exec_start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "User")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "Group")]
    pub group: Option<String>,
}

/// systemd service definition (Linux only)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    #[serde(flatten)]
    pub runtime: RuntimeConfig,

    /// Unit name without the `.service` suffix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "Description")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "After")]
    pub after: Option<String>,

    /// systemd `Restart=` policy
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "Restart")]
    pub restart: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "WorkingDirectory"
    )]
    pub working_directory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "WantedBy")]
    pub wanted_by: Option<String>,
}

impl ServiceConfig {
    /// Name of the unit file, e.g. `motobox.service`
    pub fn unit_file_name(&self) -> Option<String> {
        self.service_name
            .as_ref()
            .map(|name| format!("{name}.service"))
    }
}

/// How the deployed program is run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// A user-invoked application
    App,
    /// A background service managed by systemd
    Service,
    /// Neither (or both) runtime records populated yet
    Undetermined,
}

impl InstallMode {
    pub fn label(self) -> &'static str {
        match self {
            InstallMode::App => "app",
            InstallMode::Service => "service",
            InstallMode::Undetermined => "undetermined",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_reads_unit_style_keys() {
        let json = r#"{
            "serviceName": "motobox",
            "Description": "Motobox daemon",
            "After": "network.target",
            "ExecStart": "/usr/bin/env node /opt/motobox/dist/app.js",
            "Restart": "always",
            "User": "pi",
            "Group": "pi",
            "Environment": ["PORT=8080"],
            "WorkingDirectory": "/opt/motobox",
            "WantedBy": "multi-user.target"
        }"#;

        let service: ServiceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(service.service_name.as_deref(), Some("motobox"));
        assert_eq!(service.restart.as_deref(), Some("always"));
        assert_eq!(service.runtime.user.as_deref(), Some("pi"));
        assert_eq!(service.runtime.environment_lines, vec!["PORT=8080"]);
        assert_eq!(service.working_directory.as_deref(), Some("/opt/motobox"));
    }

    #[test]
    fn test_service_config_writes_camel_case_keys() {
        let service = ServiceConfig {
            service_name: Some("motobox".to_string()),
            wanted_by: Some("multi-user.target".to_string()),
            runtime: RuntimeConfig {
                exec_start: Some("node app.js".to_string()),
                ..RuntimeConfig::default()
            },
            ..ServiceConfig::default()
        };

        let json = serde_json::to_value(&service).unwrap();
        assert_eq!(json["serviceName"], "motobox");
        assert_eq!(json["wantedBy"], "multi-user.target");
        assert_eq!(json["execStart"], "node app.js");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_unit_file_name() {
        let service = ServiceConfig {
            service_name: Some("motobox".to_string()),
            ..ServiceConfig::default()
        };
        assert_eq!(service.unit_file_name().as_deref(), Some("motobox.service"));
        assert_eq!(ServiceConfig::default().unit_file_name(), None);
    }
}
