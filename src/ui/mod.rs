//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - `scripted` - Canned answers for non-interactive callers and tests
//! - This module - The [Prompter] seam and its terminal implementation

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::Result;

pub mod formatter;
pub mod scripted;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_changes, display_error, display_review_instruction,
    display_status, display_success, display_version_change,
};
pub use scripted::ScriptedPrompter;

/// Questions the notes workflow asks the operator
pub trait Prompter {
    /// Yes/no question, defaulting to yes
    fn confirm(&self, message: &str) -> Result<bool>;

    /// Pick one of `items`; returns the chosen index
    fn select(&self, message: &str, items: &[&str]) -> Result<usize>;

    /// Free-form text with a pre-filled default
    fn input(&self, message: &str, default: &str) -> Result<String>;
}

/// Terminal prompts rendered with `dialoguer`
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(true)
            .interact()?)
    }

    fn select(&self, message: &str, items: &[&str]) -> Result<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn input(&self, message: &str, default: &str) -> Result<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .default(default.to_string())
            .interact_text()?)
    }
}
