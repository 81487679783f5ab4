//! Root directory for repository clones
//!
//! The clone of the deployed repository lives in `<temp root>/<repositoryName>`.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the temp root
pub const TEMP_DIR_ENV: &str = "NOIN_TEMP_DIR";

/// Returns the directory clones are created in.
///
/// `NOIN_TEMP_DIR` wins when set. Never returns a relative path, so clones are
/// never created under the current working directory (e.g. when `TMPDIR=tmp`).
pub fn temp_dir_base() -> PathBuf {
    if let Some(dir) = env::var_os(TEMP_DIR_ENV).map(PathBuf::from) {
        if dir.is_absolute() {
            return dir;
        }
    }

    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}
