//! In-progress configuration record
//!
//! [`ConfigStore`] is the single mutable source of truth for one run. It loads
//! `.noin.json` (or seeds a record from command-line arguments) and exposes the
//! section of the active [`Platform`] through typed accessors.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::noin::{GitConfig, NoinConfig};
use super::platform::{LinuxConfig, PlatformUpdate, TargetConfig, WindowsConfig};
use super::runtime::{InstallMode, RuntimeConfig, ServiceConfig};
use crate::cli::InstallArgs;
use crate::error::{Result, config, platform};
use crate::platform::Platform;
use crate::ui;

/// Configuration filename, looked up in the working directory and the clone
pub const CONFIG_FILE: &str = ".noin.json";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    platform: Platform,
    config: NoinConfig,
}

impl ConfigStore {
    /// Empty record for `platform`
    pub fn new(platform: Platform) -> Self {
        Self::with_config(platform, NoinConfig::default())
    }

    pub fn with_config(platform: Platform, config: NoinConfig) -> Self {
        Self { platform, config }
    }

    /// Load the configuration for a run
    ///
    /// A `.noin.json` in `dir` always wins over `args`. Without a file and
    /// without any configuration flag the record starts empty.
    pub fn load(platform: Platform, dir: &Path, args: Option<&InstallArgs>) -> Result<Self> {
        if let Some(config) = read_config_file(dir)? {
            return Ok(Self::with_config(platform, config));
        }

        match args {
            Some(args) if !args.is_empty() => {
                ui::detail("Loading configuration from arguments");
                Ok(Self::from_args(platform, args))
            }
            _ => {
                ui::detail("No configuration provided");
                Ok(Self::new(platform))
            }
        }
    }

    /// Replace the record with `dir/.noin.json` when that file exists
    ///
    /// Returns whether the record was replaced.
    pub fn load_if_present(&mut self, dir: &Path) -> Result<bool> {
        match read_config_file(dir)? {
            Some(config) => {
                self.config = config;
                Ok(true)
            }
            None => {
                debug!("No {} in {}, keeping current configuration", CONFIG_FILE, dir.display());
                Ok(false)
            }
        }
    }

    /// Write the record to `dir/.noin.json`
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE);
        let content = self.config.to_json()?;
        fs::write(&path, content)
            .map_err(|e| config::write_failed(path.display().to_string(), e.to_string()))?;
        Ok(path)
    }

    fn from_args(platform: Platform, args: &InstallArgs) -> Self {
        let config = NoinConfig {
            is_production: args.production,
            override_existing: args.override_existing,
            git: GitConfig {
                user_name: args.user_name.clone(),
                repository_name: args.repository_name.clone(),
                url: None,
            },
            ..NoinConfig::default()
        };
        let mut store = Self::with_config(platform, config);
        store.ensure_section();

        let target = args.target_path().map(str::to_string);
        let update = if args.app {
            PlatformUpdate {
                target_path: target,
                app: Some(RuntimeConfig::default()),
                ..PlatformUpdate::default()
            }
        } else if let Some(name) = &args.service {
            if platform.supports_service() {
                PlatformUpdate::service(ServiceConfig {
                    service_name: Some(name.clone()),
                    working_directory: target,
                    ..ServiceConfig::default()
                })
            } else {
                warn!("Service installation not supported on platform '{platform}', ignoring --service");
                PlatformUpdate {
                    target_path: target,
                    ..PlatformUpdate::default()
                }
            }
        } else {
            PlatformUpdate {
                target_path: target,
                ..PlatformUpdate::default()
            }
        };

        // The update never carries a service on a platform without one.
        if let Err(e) = store.set_platform_config(update) {
            warn!("Ignoring argument configuration: {e}");
        }
        store
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn config(&self) -> &NoinConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut NoinConfig {
        &mut self.config
    }

    /// Section of the active platform
    pub fn platform_config(&self) -> Result<&TargetConfig> {
        self.target().ok_or_else(|| platform::not_configured(self.platform.id()))
    }

    fn target(&self) -> Option<&TargetConfig> {
        match self.platform {
            Platform::Linux => self.config.linux.as_ref().map(|l| &l.target),
            Platform::Windows => self.config.windows.as_ref().map(|w| &w.target),
        }
    }

    fn ensure_section(&mut self) {
        match self.platform {
            Platform::Linux => {
                self.config.linux.get_or_insert_with(LinuxConfig::default);
            }
            Platform::Windows => {
                self.config.windows.get_or_insert_with(WindowsConfig::default);
            }
        }
    }

    /// Install mode implied by the populated runtime records
    pub fn install_mode(&self) -> InstallMode {
        let has_app = self.target().is_some_and(|t| t.app.is_some());
        let has_service = self.service_config().is_some();

        match (has_app, has_service) {
            (true, false) => InstallMode::App,
            (false, true) => InstallMode::Service,
            _ => InstallMode::Undetermined,
        }
    }

    /// True when both runtime records are populated at once
    pub fn has_conflicting_modes(&self) -> bool {
        self.target().is_some_and(|t| t.app.is_some()) && self.service_config().is_some()
    }

    /// Merge `update` into the active section, creating it if needed
    pub fn set_platform_config(&mut self, mut update: PlatformUpdate) -> Result<()> {
        match self.platform {
            Platform::Linux => {
                let linux = self.config.linux.get_or_insert_with(LinuxConfig::default);
                update.merge_linux(linux);
            }
            Platform::Windows => {
                if update.service.is_some() {
                    return Err(platform::unsupported(format!(
                        "{} (systemd service)",
                        self.platform
                    )));
                }
                let windows = self.config.windows.get_or_insert_with(WindowsConfig::default);
                update.merge_target(&mut windows.target);
            }
        }
        Ok(())
    }

    pub fn clear_app(&mut self) {
        match self.platform {
            Platform::Linux => {
                if let Some(linux) = self.config.linux.as_mut() {
                    linux.target.app = None;
                }
            }
            Platform::Windows => {
                if let Some(windows) = self.config.windows.as_mut() {
                    windows.target.app = None;
                }
            }
        }
    }

    pub fn clear_service(&mut self) {
        if let Some(linux) = self.config.linux.as_mut() {
            linux.service = None;
        }
    }

    /// Service record of the Linux section, if any
    pub fn service_config(&self) -> Option<&ServiceConfig> {
        match self.platform {
            Platform::Linux => self.config.linux.as_ref()?.service.as_ref(),
            Platform::Windows => None,
        }
    }

    /// Runtime record backing `mode`
    pub fn runtime_config(&self, mode: InstallMode) -> Option<&RuntimeConfig> {
        match mode {
            InstallMode::App => self.target()?.app.as_ref(),
            InstallMode::Service => self.service_config().map(|s| &s.runtime),
            InstallMode::Undetermined => None,
        }
    }

    /// Whether `mode` can be installed as a systemd service here
    pub fn can_install_service(&self, mode: InstallMode) -> bool {
        if mode != InstallMode::Service {
            return false;
        }
        if self.platform.supports_service() {
            return true;
        }
        warn!(
            "Service installation not supported on platform '{}'",
            self.platform
        );
        false
    }
}

fn read_config_file(dir: &Path) -> Result<Option<NoinConfig>> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    ui::detail(&format!("Loading configuration from {}", path.display()));
    let content = fs::read_to_string(&path)
        .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;
    NoinConfig::from_json(&path.display().to_string(), &content).map(Some)
}
