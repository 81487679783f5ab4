//! Operating platform the installer runs on
//!
//! The platform is detected once at startup and passed through the pipeline as
//! a typed value. It selects which section of the configuration is active and
//! whether a systemd service can be installed.

use std::fmt;

use crate::error::{Result, platform};

/// Platforms with a configuration section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Windows,
}

impl Platform {
    /// Detect the platform this binary was built for
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an operating system name (as in `std::env::consts::OS`)
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Platform::Linux),
            "windows" => Ok(Platform::Windows),
            other => Err(platform::unsupported(other)),
        }
    }

    /// Configuration key of the platform section
    pub fn id(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }

    /// Only Linux can register a systemd service
    pub fn supports_service(self) -> bool {
        matches!(self, Platform::Linux)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
