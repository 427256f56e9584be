use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::{ReleaseNotesError, Result};
use crate::ui::Prompter;

/// A canned answer for [ScriptedPrompter]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Confirm(bool),
    /// Item text to pick from a selection list
    Select(String),
    Input(String),
}

/// Prompter that replays pre-recorded answers in order.
///
/// Any question without a matching queued answer is an error, so a test
/// also proves which questions were asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        ScriptedPrompter {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Messages of every question asked so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, message: &str) -> Result<Answer> {
        self.asked.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ReleaseNotesError::prompt(format!("No answer scripted for '{}'", message)))
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        match self.next(message)? {
            Answer::Confirm(answer) => Ok(answer),
            other => Err(unexpected(message, &other)),
        }
    }

    fn select(&self, message: &str, items: &[&str]) -> Result<usize> {
        match self.next(message)? {
            Answer::Select(choice) => items.iter().position(|item| *item == choice).ok_or_else(|| {
                ReleaseNotesError::prompt(format!("'{}' is not one of {:?}", choice, items))
            }),
            other => Err(unexpected(message, &other)),
        }
    }

    fn input(&self, message: &str, _default: &str) -> Result<String> {
        match self.next(message)? {
            Answer::Input(text) => Ok(text),
            other => Err(unexpected(message, &other)),
        }
    }
}

fn unexpected(message: &str, answer: &Answer) -> ReleaseNotesError {
    ReleaseNotesError::prompt(format!("Scripted {:?} does not answer '{}'", answer, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let prompter = ScriptedPrompter::new([
            Answer::Confirm(false),
            Answer::Select("minor".to_string()),
            Answer::Input("v2.0.0".to_string()),
        ]);

        assert!(!prompter.confirm("Reuse?").unwrap());
        assert_eq!(prompter.select("Increment", &["major", "minor"]).unwrap(), 1);
        assert_eq!(prompter.input("Version", "v1.0.0").unwrap(), "v2.0.0");
        assert_eq!(prompter.asked(), vec!["Reuse?", "Increment", "Version"]);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_unscripted_question_is_error() {
        let prompter = ScriptedPrompter::default();
        assert!(prompter.confirm("Reuse?").is_err());
    }

    #[test]
    fn test_mismatched_answer_is_error() {
        let prompter = ScriptedPrompter::new([Answer::Input("x".to_string())]);
        assert!(prompter.confirm("Reuse?").is_err());
    }

    #[test]
    fn test_unknown_selection_is_error() {
        let prompter = ScriptedPrompter::new([Answer::Select("huge".to_string())]);
        assert!(prompter.select("Increment", &["major"]).is_err());
    }
}
