//! Configuration handling for noin
//!
//! This module contains:
//! - [`noin`]: the root `.noin.json` record
//! - [`platform`]: per-platform sections
//! - [`runtime`]: app and service runtime records
//! - [`store`]: the in-progress record and its platform-keyed accessors

pub mod noin;
pub mod platform;
pub mod runtime;
pub mod store;

// Re-export commonly used types
pub use noin::{GitConfig, NoinConfig};
pub use platform::{LinuxConfig, PlatformUpdate, TargetConfig, WindowsConfig};
pub use runtime::{InstallMode, RuntimeConfig, ServiceConfig};
pub use store::{CONFIG_FILE, ConfigStore};
