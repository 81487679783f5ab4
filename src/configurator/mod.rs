//! Configuration resolution
//!
//! [`Configurator`] wraps the [`ConfigStore`] and guarantees that whatever a
//! pipeline step needs is present: an existing value is returned as-is,
//! otherwise the [`Prompter`] is asked and the answer is written back into the
//! store. Fields with a known default (systemd targets, restart policy, the
//! invoking account) take it without asking. Every method is idempotent, so a
//! fully populated record never prompts.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{
    ConfigStore, GitConfig, InstallMode, PlatformUpdate, RuntimeConfig, ServiceConfig,
};
use crate::error::{Result, config};
use crate::prompt::Prompter;

const MODE_CHOICES: [&str; 2] = ["Install as application", "Install as service"];

/// Value of an optional text field, treating blank strings as unset
fn given(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Account that started noin, looking through `sudo`; `root` when unknown
fn invoking_user() -> String {
    ["SUDO_USER", "USER", "USERNAME"]
        .into_iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "root".to_string())
}

pub struct Configurator<'p> {
    store: ConfigStore,
    prompter: &'p dyn Prompter,
}

impl<'p> Configurator<'p> {
    pub fn new(store: ConfigStore, prompter: &'p dyn Prompter) -> Self {
        Self { store, prompter }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConfigStore {
        &mut self.store
    }

    /// Keep `current` when set, else take `default` when one is known,
    /// otherwise ask
    fn text_or_ask(
        &self,
        current: Option<&String>,
        message: &str,
        default: Option<&str>,
    ) -> Result<String> {
        match (given(current), default.filter(|d| !d.trim().is_empty())) {
            (Some(value), _) | (None, Some(value)) => Ok(value.to_string()),
            (None, None) => self.prompter.text(message),
        }
    }

    /// Fix the install mode for the rest of the run
    ///
    /// A mode already implied by the record is kept and the opposite runtime
    /// record cleared. Otherwise the user chooses. The chosen branch then gets
    /// its minimum field: a service name, or a target path for an app.
    pub fn resolve_install_mode(&mut self) -> Result<InstallMode> {
        let mode = match self.store.install_mode() {
            InstallMode::Undetermined => self.ask_install_mode()?,
            mode => mode,
        };

        match mode {
            InstallMode::Service => {
                self.store.clear_app();
                let mut service = self.store.service_config().cloned().unwrap_or_default();
                let name = self.text_or_ask(service.service_name.as_ref(), "Service name", None)?;
                service.service_name = Some(name);
                self.store
                    .set_platform_config(PlatformUpdate::service(service))?;
            }
            InstallMode::App => {
                self.store.clear_service();
                let target = self.store.platform_config().ok();
                let app = target.and_then(|t| t.app.clone()).unwrap_or_default();
                let current_path = target.and_then(|t| t.target_path.clone());
                let target_path =
                    self.text_or_ask(current_path.as_ref(), "Target directory", None)?;
                self.store.set_platform_config(PlatformUpdate {
                    target_path: Some(target_path),
                    app: Some(app),
                    ..PlatformUpdate::default()
                })?;
            }
            InstallMode::Undetermined => {
                return Err(config::install_mode_ambiguous(
                    "no install mode was chosen",
                ));
            }
        }

        Ok(mode)
    }

    fn ask_install_mode(&self) -> Result<InstallMode> {
        if !self.store.platform().supports_service() {
            debug!(
                "Only app installs are available on {}",
                self.store.platform()
            );
            return Ok(InstallMode::App);
        }

        let choice = self
            .prompter
            .select("Choose installation mode.", &MODE_CHOICES)?;
        Ok(if choice == 1 {
            InstallMode::Service
        } else {
            InstallMode::App
        })
    }

    pub fn resolve_is_production(&mut self) -> Result<bool> {
        if let Some(is_production) = self.store.config().is_production {
            return Ok(is_production);
        }

        let answer = self
            .prompter
            .confirm("Install and build for production environment?", true)?;
        self.store.config_mut().is_production = Some(answer);
        Ok(answer)
    }

    /// GitHub coordinates with the URL always derived from them
    pub fn resolve_git_config(&mut self) -> Result<GitConfig> {
        let git = self.store.config().git.clone();
        let user_name = self.text_or_ask(git.user_name.as_ref(), "GitHub user name", None)?;
        let repository_name =
            self.text_or_ask(git.repository_name.as_ref(), "GitHub repository", None)?;

        let resolved = GitConfig {
            url: Some(GitConfig::github_url(&user_name, &repository_name)),
            user_name: Some(user_name),
            repository_name: Some(repository_name),
        };
        self.store.config_mut().git = resolved.clone();
        Ok(resolved)
    }

    /// Deployment directory: the platform target path, else the service's
    /// working directory, else asked
    pub fn resolve_target_path(&mut self) -> Result<PathBuf> {
        let target = self.store.platform_config().ok();
        if let Some(path) = given(target.and_then(|t| t.target_path.as_ref())) {
            return Ok(PathBuf::from(path));
        }

        let working_directory = self
            .store
            .service_config()
            .and_then(|s| s.working_directory.clone());
        let path = self.text_or_ask(working_directory.as_ref(), "Target directory", None)?;
        self.store
            .set_platform_config(PlatformUpdate::target_path(path.clone()))?;
        Ok(PathBuf::from(path))
    }

    /// Complete every systemd field, asking only where neither a value nor a
    /// default exists
    pub fn resolve_service_config(&mut self) -> Result<ServiceConfig> {
        let current = self.store.service_config().cloned().unwrap_or_default();
        let mut service = current.clone();

        let name = self.text_or_ask(current.service_name.as_ref(), "Service name", None)?;
        service.description = Some(self.text_or_ask(
            current.description.as_ref(),
            "Service description",
            Some(name.as_str()),
        )?);
        service.service_name = Some(name);
        service.after = Some(self.text_or_ask(
            current.after.as_ref(),
            "Start after",
            Some("network.target"),
        )?);
        service.restart = Some(self.text_or_ask(
            current.restart.as_ref(),
            "Restart mode",
            Some("always"),
        )?);
        service.runtime = self.resolve_user_and_group(&current.runtime)?;
        let default_dir = self
            .store
            .platform_config()
            .ok()
            .and_then(|t| t.target_path.clone());
        service.working_directory = Some(self.text_or_ask(
            current.working_directory.as_ref(),
            "WorkingDirectory (Target directory)",
            default_dir.as_deref(),
        )?);
        service.wanted_by = Some(self.text_or_ask(
            current.wanted_by.as_ref(),
            "WantedBy",
            Some("multi-user.target"),
        )?);

        self.store
            .set_platform_config(PlatformUpdate::service(service.clone()))?;
        Ok(service)
    }

    /// Complete the app runtime record (user and group)
    pub fn resolve_app_config(&mut self) -> Result<RuntimeConfig> {
        let current = self
            .store
            .platform_config()
            .ok()
            .and_then(|t| t.app.clone())
            .unwrap_or_default();
        let app = self.resolve_user_and_group(&current)?;

        self.store
            .set_platform_config(PlatformUpdate::app(app.clone()))?;
        Ok(app)
    }

    /// User defaults to the invoking account, group to the user's own group
    fn resolve_user_and_group(&self, current: &RuntimeConfig) -> Result<RuntimeConfig> {
        let mut runtime = current.clone();
        let account = invoking_user();
        let user = self.text_or_ask(current.user.as_ref(), "User", Some(account.as_str()))?;
        let group = self.text_or_ask(current.group.as_ref(), "Group", Some(user.as_str()))?;
        runtime.user = Some(user);
        runtime.group = Some(group);
        Ok(runtime)
    }

    /// Whether the repository may be cloned into `temp_root`
    ///
    /// An existing clone is deleted only when overriding is allowed, either by
    /// `overrideExisting` or by the user's answer.
    pub fn can_clone(&mut self, temp_root: &Path) -> Result<bool> {
        let clone_dir = self.clone_dir(temp_root)?;
        if !clone_dir.exists() {
            return Ok(true);
        }

        let override_existing = match self.store.config().override_existing {
            Some(value) => value,
            None => {
                let answer = self.prompter.confirm(
                    "Repository already exists. Override folder content?",
                    true,
                )?;
                self.store.config_mut().override_existing = Some(answer);
                answer
            }
        };

        if !override_existing {
            return Ok(false);
        }

        debug!("Removing existing clone at {}", clone_dir.display());
        fs::remove_dir_all(&clone_dir)?;
        Ok(true)
    }

    /// `temp_root/<repositoryName>`
    pub fn clone_dir(&self, temp_root: &Path) -> Result<PathBuf> {
        given(self.store.config().git.repository_name.as_ref())
            .map(|name| temp_root.join(name))
            .ok_or_else(|| config::invalid("git.repositoryName is missing"))
    }
}
