//! Operator input.
//!
//! The restore flow only ever needs two questions: "pick one of these" and
//! "type something that passes this check".  [`Prompter`] captures exactly
//! that so the flow can be tested with a scripted implementation, while
//! [`TerminalPrompter`] asks on the real terminal via `dialoguer`.

use anyhow::Result;
use dialoguer::{Input, Select, theme::ColorfulTheme};

/// Synchronous validator for free-text answers.  `Err` carries the message
/// shown before asking again.
pub type Validator = fn(&str) -> Result<(), String>;

pub trait Prompter {
    /// Single-choice selection.  `Ok(None)` means the operator backed out
    /// without choosing.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>>;

    /// Free-text answer.  Input rejected by `validate` is never returned;
    /// the question is asked again.
    fn text(&mut self, prompt: &str, validate: Validator) -> Result<String>;
}

/// Interactive prompts on stderr/stdin.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        // Esc or `q` returns None.
        let choice = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()?;
        Ok(choice)
    }

    fn text(&mut self, prompt: &str, validate: Validator) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(move |input: &String| validate(input))
            .interact_text()?;
        Ok(answer)
    }
}
