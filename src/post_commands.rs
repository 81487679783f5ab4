//! Post-install shell commands with `${field}` placeholders

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::debug;

use crate::config::{ConfigStore, InstallMode};
use crate::error::Result;
use crate::process::{ProcessRunner, run_checked};

#[allow(clippy::expect_used)]
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z0-9_.]+)\}").expect("valid placeholder regex"));

/// Configuration values visible to placeholders, searched in order
///
/// Root record, git section, active platform section, active runtime record.
#[derive(Debug, Clone)]
pub struct PlaceholderContext {
    layers: Vec<Value>,
}

impl PlaceholderContext {
    pub fn from_store(store: &ConfigStore, mode: InstallMode) -> Result<Self> {
        let root = serde_json::to_value(store.config())?;
        let git = root.get("git").cloned().unwrap_or(Value::Null);
        let section = root
            .get(store.platform().id())
            .cloned()
            .unwrap_or(Value::Null);
        let record = match mode {
            InstallMode::App => section.get("app").cloned(),
            InstallMode::Service => section.get("service").cloned(),
            InstallMode::Undetermined => None,
        }
        .unwrap_or(Value::Null);

        Ok(Self {
            layers: vec![root, git, section, record],
        })
    }

    /// Scalar at a dotted `path`, formatted for a shell command
    pub fn lookup(&self, path: &str) -> Option<String> {
        let pointer = format!("/{}", path.replace('.', "/"));
        self.layers
            .iter()
            .filter_map(|layer| layer.pointer(&pointer))
            .find_map(|value| match value {
                Value::String(s) => Some(s.clone()),
                Value::Bool(b) => Some(b.to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// Replace every known placeholder; unknown ones stay as written
    pub fn substitute(&self, template: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(template, |caps: &Captures| {
                self.lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Templates for this run: the runtime record's list, else the root list
pub fn templates(store: &ConfigStore, mode: InstallMode) -> Vec<String> {
    match store.runtime_config(mode) {
        Some(runtime) if !runtime.post_commands.is_empty() => runtime.post_commands.clone(),
        _ => store.config().post_commands.clone(),
    }
}

/// Substitute and run every post command in `cwd`, stopping at the first
/// failure
///
/// Returns the number of commands run.
pub fn run_post_commands(
    runner: &dyn ProcessRunner,
    store: &ConfigStore,
    mode: InstallMode,
    cwd: &Path,
) -> Result<usize> {
    let templates = templates(store, mode);
    if templates.is_empty() {
        debug!("No post commands configured");
        return Ok(0);
    }

    let context = PlaceholderContext::from_store(store, mode)?;
    for template in &templates {
        let command = context.substitute(template);
        run_checked(runner, &command, cwd)?;
    }
    Ok(templates.len())
}
