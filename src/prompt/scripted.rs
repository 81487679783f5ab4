//! Deterministic prompter for tests

use std::cell::RefCell;
use std::collections::VecDeque;

use super::Prompter;
use crate::error::Result;

/// One scripted answer
#[derive(Debug, Clone)]
pub enum Answer {
    Select(usize),
    Confirm(bool),
    Text(String),
}

impl Answer {
    pub fn text(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

/// Replays answers in order and records every question asked
///
/// Panics when a question arrives with no answer left or with an answer of
/// the wrong kind.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// A prompter that fails the test if anything is asked
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, message: &str) -> Answer {
        self.asked.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {message}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, message: &str, options: &[&str]) -> Result<usize> {
        match self.next(message) {
            Answer::Select(index) if index < options.len() => Ok(index),
            other => panic!("expected select answer for '{message}', got {other:?}"),
        }
    }

    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message) {
            Answer::Confirm(value) => Ok(value),
            other => panic!("expected confirm answer for '{message}', got {other:?}"),
        }
    }

    fn text(&self, message: &str) -> Result<String> {
        match self.next(message) {
            Answer::Text(value) => Ok(value),
            other => panic!("expected text answer for '{message}', got {other:?}"),
        }
    }
}
