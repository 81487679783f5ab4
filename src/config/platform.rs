//! Per-platform configuration sections
//!
//! Both platforms share a [`TargetConfig`]; only [`LinuxConfig`] may carry a
//! systemd service. Inside one section `app` and `service` are mutually
//! exclusive, which [`PlatformUpdate`] enforces when it is merged.

use serde::{Deserialize, Serialize};

use super::runtime::{RuntimeConfig, ServiceConfig};

/// Fields every platform section has
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfig {
    /// Deployment destination directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,

    /// Entry point read from the package manifest
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "bin")]
    pub resolved_binary_path: Option<String>,

    /// Present iff the install mode is app
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<RuntimeConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinuxConfig {
    #[serde(flatten)]
    pub target: TargetConfig,

    /// Present iff the install mode is service
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "systemd")]
    pub service: Option<ServiceConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsConfig {
    #[serde(flatten)]
    pub target: TargetConfig,
}

/// Partial platform section merged by `ConfigStore::set_platform_config`
///
/// Unset fields leave the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct PlatformUpdate {
    pub target_path: Option<String>,
    pub resolved_binary_path: Option<String>,
    pub app: Option<RuntimeConfig>,
    pub service: Option<ServiceConfig>,
}

impl PlatformUpdate {
    pub fn target_path(path: impl Into<String>) -> Self {
        Self {
            target_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn app(app: RuntimeConfig) -> Self {
        Self {
            app: Some(app),
            ..Self::default()
        }
    }

    pub fn service(service: ServiceConfig) -> Self {
        Self {
            service: Some(service),
            ..Self::default()
        }
    }

    pub(crate) fn merge_target(&mut self, target: &mut TargetConfig) {
        if let Some(path) = self.target_path.take() {
            target.target_path = Some(path);
        }
        if let Some(bin) = self.resolved_binary_path.take() {
            target.resolved_binary_path = Some(bin);
        }
        if let Some(app) = self.app.take() {
            target.app = Some(app);
        }
    }

    /// Merge into a Linux section, keeping app and service exclusive
    pub(crate) fn merge_linux(mut self, linux: &mut LinuxConfig) {
        let sets_app = self.app.is_some();
        let service = self.service.take();
        self.merge_target(&mut linux.target);

        if let Some(service) = service {
            linux.service = Some(service);
            linux.target.app = None;
        } else if sets_app {
            linux.service = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linux_section_reads_legacy_keys() {
        let json = r#"{
            "targetPath": "/opt/motobox",
            "bin": "/opt/motobox/dist/app.js",
            "systemd": { "serviceName": "motobox" }
        }"#;

        let linux: LinuxConfig = serde_json::from_str(json).unwrap();
        assert_eq!(linux.target.target_path.as_deref(), Some("/opt/motobox"));
        assert_eq!(
            linux.target.resolved_binary_path.as_deref(),
            Some("/opt/motobox/dist/app.js")
        );
        assert_eq!(
            linux.service.and_then(|s| s.service_name).as_deref(),
            Some("motobox")
        );
    }

    #[test]
    fn test_merge_service_clears_app() {
        let mut linux = LinuxConfig {
            target: TargetConfig {
                app: Some(RuntimeConfig::default()),
                ..TargetConfig::default()
            },
            service: None,
        };

        PlatformUpdate::service(ServiceConfig::default()).merge_linux(&mut linux);

        assert!(linux.service.is_some());
        assert!(linux.target.app.is_none());
    }

    #[test]
    fn test_merge_app_clears_service() {
        let mut linux = LinuxConfig {
            target: TargetConfig::default(),
            service: Some(ServiceConfig::default()),
        };

        PlatformUpdate::app(RuntimeConfig::default()).merge_linux(&mut linux);

        assert!(linux.target.app.is_some());
        assert!(linux.service.is_none());
    }

    #[test]
    fn test_merge_target_path_keeps_runtime_records() {
        let mut linux = LinuxConfig {
            target: TargetConfig::default(),
            service: Some(ServiceConfig::default()),
        };

        PlatformUpdate::target_path("/opt/app").merge_linux(&mut linux);

        assert_eq!(linux.target.target_path.as_deref(), Some("/opt/app"));
        assert!(linux.service.is_some());
    }
}
