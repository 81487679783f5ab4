//! Error types and handling for noin
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration file and record errors
//! - [`command`]: External command errors
//! - [`fs`]: File system errors
//! - [`platform`]: Platform errors

pub mod command;
pub mod config;
pub mod fs;
pub mod platform;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for noin operations
#[derive(Error, Diagnostic, Debug)]
pub enum NoinError {
    // Configuration errors
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(noin::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(noin::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(
        code(noin::config::parse_failed),
        help("The file must be a JSON document mirroring the noin configuration")
    )]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to write configuration file: {path}")]
    #[diagnostic(code(noin::config::write_failed))]
    ConfigWriteFailed { path: String, reason: String },

    #[error("Platform '{platform}' not configured")]
    #[diagnostic(
        code(noin::config::platform_not_configured),
        help("Add a '{platform}' section to .noin.json or pass --target")
    )]
    PlatformNotConfigured { platform: String },

    #[error("Install mode is ambiguous: {message}")]
    #[diagnostic(
        code(noin::config::install_mode_ambiguous),
        help("Configure either 'app' or 'service' for the platform, not both")
    )]
    InstallModeAmbiguous { message: String },

    // Platform errors
    #[error("Platform '{platform}' not supported")]
    #[diagnostic(
        code(noin::platform::unsupported),
        help("Supported platforms: linux, windows")
    )]
    UnsupportedPlatform { platform: String },

    // Clone errors
    #[error("Repository folder '{path}' already exists")]
    #[diagnostic(
        code(noin::clone::precondition_failed),
        help("Remove the folder or run again with --override true")
    )]
    ClonePreconditionFailed { path: String },

    // External command errors
    #[error("Command failed with {}: {command}", exit_description(*.code))]
    #[diagnostic(code(noin::command::failed))]
    ExternalCommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to start command: {command}: {reason}")]
    #[diagnostic(code(noin::command::spawn_failed))]
    CommandSpawnFailed { command: String, reason: String },

    // Manifest errors
    #[error("Failed to read package manifest: {path}")]
    #[diagnostic(
        code(noin::manifest::read_failed),
        help("The repository root must contain a package.json")
    )]
    ManifestReadFailed { path: String, reason: String },

    #[error("Invalid package manifest: {message}")]
    #[diagnostic(
        code(noin::manifest::invalid),
        help("Declare the entry point with 'bin' or 'main' in package.json")
    )]
    ManifestInvalid { message: String },

    // File system errors
    #[error("Failed to write file: {path}")]
    #[diagnostic(code(noin::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(noin::fs::io_error))]
    IoError { message: String },

    // Interaction errors
    #[error("Failed to read answer: {message}")]
    #[diagnostic(code(noin::prompt::failed))]
    PromptFailed { message: String },

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(noin::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(noin::git::operation_failed))]
    GitOperationFailed { message: String },
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status".to_string(),
    }
}

impl From<std::io::Error> for NoinError {
    fn from(err: std::io::Error) -> Self {
        NoinError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for NoinError {
    fn from(err: serde_json::Error) -> Self {
        NoinError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for NoinError {
    fn from(err: git2::Error) -> Self {
        NoinError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for NoinError {
    fn from(err: inquire::InquireError) -> Self {
        NoinError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, NoinError>;
