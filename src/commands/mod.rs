//! Command implementations for the noin CLI

pub mod completions;
pub mod install;
pub mod version;
