//! Terminal presentation for installer progress
//!
//! Step banners and details go to stdout with `console` styling. Diagnostics
//! (warnings, debug traces) go through `tracing` instead.

use console::Style;

/// Announce a pipeline step
pub fn step(message: &str) {
    println!("{}", Style::new().green().bold().apply_to(message));
}

/// Secondary information under a step
pub fn detail(message: &str) {
    println!("{}", Style::new().dim().apply_to(message));
}

/// Final success line
pub fn success(message: &str) {
    println!("{}", Style::new().green().apply_to(message));
}

/// Error line for the top-level failure report
pub fn error(message: &str) {
    eprintln!("{}", Style::new().red().bold().apply_to(message));
}

/// Captured standard error of a failed command
pub fn command_output(stderr: &str) {
    let trimmed = stderr.trim_end();
    if !trimmed.is_empty() {
        eprintln!("{}", Style::new().red().apply_to(trimmed));
    }
}
