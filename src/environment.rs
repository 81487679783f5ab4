//! `.env` file next to the deployed program

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::RuntimeConfig;
use crate::error::{Result, fs as fs_error};

pub const ENV_FILE: &str = ".env";

/// Write the runtime's environment lines to `target/.env`
///
/// One entry per line, verbatim. Returns the file path, or `None` when there
/// is nothing to write.
pub fn write_env_file(target: &Path, runtime: Option<&RuntimeConfig>) -> Result<Option<PathBuf>> {
    let Some(lines) = runtime
        .map(|r| &r.environment_lines)
        .filter(|lines| !lines.is_empty())
    else {
        return Ok(None);
    };

    let path = target.join(ENV_FILE);
    let content: String = lines.iter().map(|line| format!("{line}\n")).collect();
    fs::write(&path, content)
        .map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::create_temp_dir;

    #[test]
    fn test_writes_one_line_per_entry() {
        let temp = create_temp_dir();
        let runtime = RuntimeConfig {
            environment_lines: vec!["PORT=8080".to_string(), "NODE_ENV=production".to_string()],
            ..RuntimeConfig::default()
        };

        let path = write_env_file(temp.path(), Some(&runtime)).unwrap().unwrap();

        assert_eq!(path, temp.path().join(".env"));
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "PORT=8080\nNODE_ENV=production\n"
        );
    }

    #[test]
    fn test_skips_without_lines() {
        let temp = create_temp_dir();

        assert_eq!(write_env_file(temp.path(), None).unwrap(), None);
        assert_eq!(
            write_env_file(temp.path(), Some(&RuntimeConfig::default())).unwrap(),
            None
        );
        assert!(!temp.path().join(".env").exists());
    }

    #[test]
    fn test_write_failure_names_the_file() {
        let temp = create_temp_dir();
        let runtime = RuntimeConfig {
            environment_lines: vec!["A=1".to_string()],
            ..RuntimeConfig::default()
        };

        let err = write_env_file(&temp.path().join("missing"), Some(&runtime)).unwrap_err();

        assert!(err.to_string().contains(".env"));
    }
}
