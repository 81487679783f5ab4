//! systemd service installation (Linux)
//!
//! A fully resolved [`ServiceConfig`] is rendered into a unit file, staged in
//! the temp root and moved into the system unit directory with `sudo`, after
//! which systemd is reloaded and the unit enabled and restarted.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ServiceConfig;
use crate::error::{Result, config, fs as fs_error};
use crate::process::{ProcessRunner, run_checked};

/// Where unit files are installed
pub const SYSTEM_UNIT_DIR: &str = "/etc/systemd/system";

/// `ExecStart=` for a Node.js entry point
///
/// When an env file was written, node preloads `dotenv/config` pointed at it.
pub fn derive_exec_start(binary: &Path, env_file: Option<&Path>) -> String {
    match env_file {
        Some(env_file) => format!(
            "/usr/bin/env node -r dotenv/config {} dotenv_config_path={}",
            binary.display(),
            env_file.display()
        ),
        None => format!("/usr/bin/env node {}", binary.display()),
    }
}

fn required<'a>(value: Option<&'a String>, field: &str) -> Result<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| config::invalid(format!("service.{field} is missing")))
}

/// Render the unit file for `service`
pub fn render_unit(service: &ServiceConfig) -> Result<String> {
    let runtime = &service.runtime;
    let environment: String = runtime
        .environment_lines
        .iter()
        .map(|line| format!("Environment={line}\n"))
        .collect();

    Ok(format!(
        "[Unit]\n\
         Description={description}\n\
         After={after}\n\
         \n\
         [Service]\n\
         ExecStart={exec_start}\n\
         Restart={restart}\n\
         User={user}\n\
         Group={group}\n\
         {environment}\
         WorkingDirectory={working_directory}\n\
         \n\
         [Install]\n\
         WantedBy={wanted_by}\n",
        description = required(service.description.as_ref(), "description")?,
        after = required(service.after.as_ref(), "after")?,
        exec_start = required(runtime.exec_start.as_ref(), "execStart")?,
        restart = required(service.restart.as_ref(), "restart")?,
        user = required(runtime.user.as_ref(), "user")?,
        group = required(runtime.group.as_ref(), "group")?,
        working_directory = required(service.working_directory.as_ref(), "workingDirectory")?,
        wanted_by = required(service.wanted_by.as_ref(), "wantedBy")?,
    ))
}

/// Stage `unit` in `staging_dir`, move it into `unit_dir` and (re)start it
///
/// Returns the installed unit path.
pub fn install_unit(
    runner: &dyn ProcessRunner,
    service: &ServiceConfig,
    unit: &str,
    staging_dir: &Path,
    unit_dir: &Path,
) -> Result<PathBuf> {
    let file_name = service
        .unit_file_name()
        .ok_or_else(|| config::invalid("service.serviceName is missing"))?;

    let staged = staging_dir.join(&file_name);
    fs::write(&staged, unit)
        .map_err(|e| fs_error::write_failed(staged.display().to_string(), e.to_string()))?;

    let installed = unit_dir.join(&file_name);
    let commands = [
        format!("sudo mv {} {}", staged.display(), installed.display()),
        "sudo systemctl daemon-reload".to_string(),
        format!("sudo systemctl enable {file_name}"),
        format!("sudo systemctl restart {file_name}"),
    ];
    for command in &commands {
        run_checked(runner, command, staging_dir)?;
    }

    Ok(installed)
}
