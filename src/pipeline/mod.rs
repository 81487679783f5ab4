//! Install orchestration
//!
//! [`InstallPipeline`] runs one install from start to finish:
//!
//! ```text
//! resolve git → clone guard → clone → reload config → read manifest →
//! resolve mode → build → deploy → write .env → service | app → cleanup →
//! post commands
//! ```
//!
//! Every step is synchronous. The first error ends the run and nothing
//! already done is undone, so a failed build can leave the clone behind and a
//! failed deploy can leave a partially populated target.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cli::InstallArgs;
use crate::common::fs::{CopyOptions, copy_dir_recursive};
use crate::config::{ConfigStore, InstallMode, PlatformUpdate};
use crate::configurator::Configurator;
use crate::environment::write_env_file;
use crate::error::{NoinError, Result};
use crate::git;
use crate::manifest::{MANIFEST_FILE, PackageManifest};
use crate::platform::Platform;
use crate::post_commands::run_post_commands;
use crate::process::{ProcessRunner, run_checked};
use crate::prompt::Prompter;
use crate::service::{self, SYSTEM_UNIT_DIR};
use crate::temp::temp_dir_base;
use crate::ui;

pub const DEFAULT_INSTALL_SCRIPT: &str = "npm install";
pub const DEFAULT_BUILD_SCRIPT: &str = "npm run build";

/// Where a run reads from and writes to
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub platform: Platform,
    /// Directory searched for `.noin.json`
    pub working_dir: PathBuf,
    /// Parent of the repository clone; unit files are staged here too
    pub temp_root: PathBuf,
    /// systemd unit directory
    pub unit_dir: PathBuf,
    /// Write the resolved record back to `working_dir/.noin.json`
    pub save: bool,
}

impl PipelineOptions {
    pub fn new(platform: Platform, working_dir: PathBuf) -> Self {
        Self {
            platform,
            working_dir,
            temp_root: temp_dir_base(),
            unit_dir: PathBuf::from(SYSTEM_UNIT_DIR),
            save: false,
        }
    }
}

/// What a finished run installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub mode: InstallMode,
    pub target_path: PathBuf,
    pub binary_path: PathBuf,
    /// Installed unit file, for service installs
    pub unit_path: Option<PathBuf>,
    pub post_commands: usize,
}

pub struct InstallPipeline<'a> {
    configurator: Configurator<'a>,
    runner: &'a dyn ProcessRunner,
    options: PipelineOptions,
}

impl<'a> InstallPipeline<'a> {
    pub fn new(
        store: ConfigStore,
        prompter: &'a dyn Prompter,
        runner: &'a dyn ProcessRunner,
        options: PipelineOptions,
    ) -> Self {
        Self {
            configurator: Configurator::new(store, prompter),
            runner,
            options,
        }
    }

    /// Load the configuration from `options.working_dir` (or `args`) and
    /// build a pipeline on it
    pub fn load(
        args: &InstallArgs,
        prompter: &'a dyn Prompter,
        runner: &'a dyn ProcessRunner,
        options: PipelineOptions,
    ) -> Result<Self> {
        ui::step("Loading configuration");
        let store = ConfigStore::load(options.platform, &options.working_dir, Some(args))?;
        Ok(Self::new(store, prompter, runner, options))
    }

    pub fn store(&self) -> &ConfigStore {
        self.configurator.store()
    }

    /// Run every remaining step
    pub fn run(mut self) -> Result<InstallReport> {
        let clone_dir = self.clone_repository()?;
        self.reload_config(&clone_dir)?;
        let manifest = self.read_manifest(&clone_dir)?;

        let mode = self.resolve_mode()?;
        let target = self.configurator.resolve_target_path()?;
        let binary_path = manifest.binary_path(&target)?;
        self.configurator
            .store_mut()
            .set_platform_config(PlatformUpdate {
                resolved_binary_path: Some(binary_path.display().to_string()),
                ..PlatformUpdate::default()
            })?;

        self.build(&clone_dir)?;
        self.deploy(&clone_dir, &manifest, &target)?;
        let env_file = self.write_env(&target, mode)?;

        let unit_path = if self.store().can_install_service(mode) {
            Some(self.install_service(&binary_path, env_file.as_deref())?)
        } else {
            self.register_app()?;
            None
        };

        Self::cleanup(&clone_dir)?;
        let post_commands = self.post_commands(mode, &target)?;

        if self.options.save {
            let path = self.store().save(&self.options.working_dir)?;
            ui::detail(&format!("Saved configuration to {}", path.display()));
        }

        ui::success(&format!(
            "Installed {} as {} in {}",
            self.store()
                .config()
                .git
                .repository_name
                .as_deref()
                .unwrap_or_default(),
            mode.label(),
            target.display()
        ));

        Ok(InstallReport {
            mode,
            target_path: target,
            binary_path,
            unit_path,
            post_commands,
        })
    }

    /// Resolve the repository, guard the clone directory and clone into it
    fn clone_repository(&mut self) -> Result<PathBuf> {
        let git = self.configurator.resolve_git_config()?;
        let temp_root = self.options.temp_root.clone();
        let clone_dir = self.configurator.clone_dir(&temp_root)?;

        if !self.configurator.can_clone(&temp_root)? {
            return Err(NoinError::ClonePreconditionFailed {
                path: clone_dir.display().to_string(),
            });
        }

        ui::step("Cloning repository");
        fs::create_dir_all(&temp_root)?;
        let url = git.url.unwrap_or_default();
        ui::detail(&format!("{url} -> {}", clone_dir.display()));
        run_checked(
            self.runner,
            &format!("git clone --depth 1 {url}"),
            &temp_root,
        )?;

        match git::head_commit(&clone_dir) {
            Ok(Some(head)) => ui::detail(&format!(
                "Cloned {} ({})",
                head.short_id(),
                head.summary
            )),
            Ok(None) => debug!("Clone has no commits"),
            Err(e) => debug!("Cannot inspect clone: {e}"),
        }

        Ok(clone_dir)
    }

    /// A `.noin.json` shipped with the project supersedes the current record
    fn reload_config(&mut self, clone_dir: &Path) -> Result<()> {
        if self.configurator.store_mut().load_if_present(clone_dir)? {
            info!("Using configuration from the repository");
        }
        Ok(())
    }

    fn read_manifest(&mut self, clone_dir: &Path) -> Result<PackageManifest> {
        let manifest = PackageManifest::read(clone_dir)?;
        let entry = manifest.entry_point()?;
        ui::detail(&format!("Entry point {entry}"));

        let target = self
            .store()
            .platform_config()
            .ok()
            .and_then(|t| t.target_path.clone());
        if let Some(target) = target {
            let binary_path = manifest.binary_path(Path::new(&target))?;
            self.configurator
                .store_mut()
                .set_platform_config(PlatformUpdate {
                    resolved_binary_path: Some(binary_path.display().to_string()),
                    ..PlatformUpdate::default()
                })?;
        }
        Ok(manifest)
    }

    fn resolve_mode(&mut self) -> Result<InstallMode> {
        let mode = self.configurator.resolve_install_mode()?;
        ui::detail(&format!("Installing as {}", mode.label()));
        Ok(mode)
    }

    fn build(&self, clone_dir: &Path) -> Result<()> {
        ui::step("Building project");
        let config = self.store().config();
        let install = config
            .install_script
            .clone()
            .unwrap_or_else(|| DEFAULT_INSTALL_SCRIPT.to_string());
        let build = config
            .build_script
            .clone()
            .unwrap_or_else(|| DEFAULT_BUILD_SCRIPT.to_string());

        run_checked(self.runner, &install, clone_dir)?;
        run_checked(self.runner, &build, clone_dir)
    }

    /// Copy the entry point's directory and the manifest into `target`, then
    /// install the runtime dependencies there
    fn deploy(
        &mut self,
        clone_dir: &Path,
        manifest: &PackageManifest,
        target: &Path,
    ) -> Result<()> {
        ui::step("Copying binaries to target");
        let executable_dir = manifest.executable_dir()?;
        let source = clone_dir.join(&executable_dir);
        let destination = target.join(&executable_dir);
        ui::detail(&format!("Source '{}'", source.display()));
        ui::detail(&format!("Target '{}'", destination.display()));

        fs::create_dir_all(target)?;
        let mut options = CopyOptions::exclude_git();
        options.exclude.push("node_modules".to_string());
        let copied = copy_dir_recursive(&source, &destination, &options)?;
        debug!("Copied {copied} files");
        fs::copy(clone_dir.join(MANIFEST_FILE), target.join(MANIFEST_FILE))?;

        ui::step("Installing dependencies");
        let command = if self.configurator.resolve_is_production()? {
            "npm install --production"
        } else {
            "npm install"
        };
        run_checked(self.runner, command, target)
    }

    fn write_env(&self, target: &Path, mode: InstallMode) -> Result<Option<PathBuf>> {
        let env_file = write_env_file(target, self.store().runtime_config(mode))?;
        if let Some(path) = &env_file {
            ui::detail(&format!("Wrote {}", path.display()));
        }
        Ok(env_file)
    }

    fn install_service(&mut self, binary_path: &Path, env_file: Option<&Path>) -> Result<PathBuf> {
        ui::step("Installing service");
        let mut service = self
            .store()
            .service_config()
            .cloned()
            .unwrap_or_default();
        if service.runtime.exec_start.is_none() {
            service.runtime.exec_start = Some(service::derive_exec_start(binary_path, env_file));
        }
        if service.working_directory.is_none() {
            service.working_directory = binary_path
                .parent()
                .map(|dir| dir.display().to_string());
        }
        self.configurator
            .store_mut()
            .set_platform_config(PlatformUpdate::service(service))?;

        let service = self.configurator.resolve_service_config()?;
        let unit = service::render_unit(&service)?;
        fs::create_dir_all(&self.options.temp_root)?;
        let installed = service::install_unit(
            self.runner,
            &service,
            &unit,
            &self.options.temp_root,
            &self.options.unit_dir,
        )?;
        ui::detail(&format!("Installed {}", installed.display()));
        Ok(installed)
    }

    fn register_app(&mut self) -> Result<()> {
        ui::step("Configuring application");
        let app = self.configurator.resolve_app_config()?;
        debug!(user = ?app.user, group = ?app.group, "application configured");
        Ok(())
    }

    fn cleanup(clone_dir: &Path) -> Result<()> {
        ui::step("Removing temporary files");
        if clone_dir.exists() {
            fs::remove_dir_all(clone_dir)?;
        }
        Ok(())
    }

    fn post_commands(&mut self, mode: InstallMode, target: &Path) -> Result<usize> {
        let count = run_post_commands(self.runner, self.store(), mode, target)?;
        if count > 0 {
            ui::detail(&format!("Ran {count} post commands"));
        }
        Ok(count)
    }
}
