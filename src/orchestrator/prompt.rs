//! Operator confirmation gates.
use dialoguer::{Confirm, theme::ColorfulTheme};

#[cfg(test)]
use mockall::automock;

use crate::Result;

/// Asks the operator a yes/no question.
#[cfg_attr(test, automock)]
pub trait Prompt {
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// Interactive terminal prompt. Blocks until the operator answers.
#[derive(Debug, Default)]
pub struct TermPrompt;

impl Prompt for TermPrompt {
    fn confirm(&self, message: &str) -> Result<bool> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}
