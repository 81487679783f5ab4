//! External command errors

use super::NoinError;

/// Creates an error for a command that exited unsuccessfully
pub fn failed(command: impl Into<String>, code: Option<i32>, stderr: impl Into<String>) -> NoinError {
    NoinError::ExternalCommandFailed {
        command: command.into(),
        code,
        stderr: stderr.into(),
    }
}

/// Creates an error for a command that could not be started
pub fn spawn_failed(command: impl Into<String>, reason: impl Into<String>) -> NoinError {
    NoinError::CommandSpawnFailed {
        command: command.into(),
        reason: reason.into(),
    }
}
