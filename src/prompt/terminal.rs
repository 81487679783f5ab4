//! Prompts rendered with `inquire`

use inquire::validator::Validation;
use inquire::{Confirm, CustomUserError, Select, Text};

use super::Prompter;
use crate::error::{NoinError, Result};

/// Asks on the controlling terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, options: &[&str]) -> Result<usize> {
        let answer = Select::new(message, options.to_vec())
            .with_help_message("↑↓ to move, ENTER to confirm")
            .prompt()?;

        options
            .iter()
            .position(|option| *option == answer)
            .ok_or_else(|| NoinError::PromptFailed {
                message: format!("unexpected choice '{answer}'"),
            })
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::new(message)
            .with_default(default)
            .prompt()
            .map_err(NoinError::from)
    }

    fn text(&self, message: &str) -> Result<String> {
        let answer = Text::new(message).with_validator(require_value).prompt()?;
        Ok(answer.trim().to_string())
    }
}

fn require_value(input: &str) -> std::result::Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("A value is required".into()))
    } else {
        Ok(Validation::Valid)
    }
}
