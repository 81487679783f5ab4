//! Interactive input
//!
//! The resolver asks questions through the [`Prompter`] trait so it can run
//! against a real terminal ([`TerminalPrompter`]) or a scripted answer list in
//! tests.

mod terminal;

#[cfg(test)]
pub mod scripted;

pub use terminal::TerminalPrompter;

use crate::error::Result;

/// Answers select, confirm and text questions
pub trait Prompter {
    /// Choose one of `options`, returning its index
    fn select(&self, message: &str, options: &[&str]) -> Result<usize>;

    /// Yes/no question
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Free text; the answer is never empty
    fn text(&self, message: &str) -> Result<String>;
}
