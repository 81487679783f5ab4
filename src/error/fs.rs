//! File system errors

use super::NoinError;

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> NoinError {
    NoinError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
