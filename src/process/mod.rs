//! Shell command execution
//!
//! Every external step (clone, install, build, systemctl, post commands) is a
//! shell command string run through a [`ProcessRunner`]. Runs are synchronous;
//! [`run_checked`] turns any nonzero exit into
//! [`NoinError::ExternalCommandFailed`](crate::error::NoinError::ExternalCommandFailed).

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Result, command};

/// Exit status and captured standard error of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Abstraction for running shell commands
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner {
    /// Runs `command` through the platform shell inside `cwd`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the shell cannot be started; a command that
    /// runs and fails is reported through [`CommandOutput::code`].
    fn run(&self, command: &str, cwd: &Path) -> Result<CommandOutput>;
}

/// Runs commands with `sh -c` (or `cmd /C` on Windows)
///
/// Standard output is passed through to the terminal. Standard error is
/// echoed as it arrives and also captured for error reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ProcessRunner for ShellRunner {
    fn run(&self, command_line: &str, cwd: &Path) -> Result<CommandOutput> {
        let mut child = shell_command(command_line)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| command::spawn_failed(command_line, e.to_string()))?;

        let mut captured = String::new();
        if let Some(stderr) = child.stderr.take() {
            let mut terminal = std::io::stderr();
            for line in BufReader::new(stderr).lines() {
                let line = line?;
                writeln!(terminal, "{line}")?;
                captured.push_str(&line);
                captured.push('\n');
            }
        }

        let status = child
            .wait()
            .map_err(|e| command::spawn_failed(command_line, e.to_string()))?;

        Ok(CommandOutput {
            code: status.code(),
            stderr: captured,
        })
    }
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command_line);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

/// Run a command and fail on a nonzero exit status
pub fn run_checked(runner: &dyn ProcessRunner, command_line: &str, cwd: &Path) -> Result<()> {
    debug!(command = command_line, cwd = %cwd.display(), "running command");
    let output = runner.run(command_line, cwd)?;
    if output.is_success() {
        Ok(())
    } else {
        Err(command::failed(command_line, output.code, output.stderr))
    }
}
