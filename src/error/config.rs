//! Configuration errors

use super::NoinError;

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> NoinError {
    NoinError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> NoinError {
    NoinError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> NoinError {
    NoinError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> NoinError {
    NoinError::ConfigWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an ambiguous install mode error
pub fn install_mode_ambiguous(message: impl Into<String>) -> NoinError {
    NoinError::InstallModeAmbiguous {
        message: message.into(),
    }
}
