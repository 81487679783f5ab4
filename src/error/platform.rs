//! Platform errors

use super::NoinError;

/// Creates an unsupported platform error
pub fn unsupported(platform: impl Into<String>) -> NoinError {
    NoinError::UnsupportedPlatform {
        platform: platform.into(),
    }
}

/// Creates a platform not configured error
pub fn not_configured(platform: impl Into<String>) -> NoinError {
    NoinError::PlatformNotConfigured {
        platform: platform.into(),
    }
}
