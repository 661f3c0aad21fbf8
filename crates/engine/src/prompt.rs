// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator interaction capability.
//!
//! Every interactive fallback goes through [`Prompter`] so the managers and
//! the parameter resolver can be driven by a script in tests.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// The operator interrupted the prompt (Ctrl-C / Esc).
    #[error("cancelled")]
    Cancelled,
    #[error("prompt failed: {0}")]
    Failed(String),
}

/// Asks the operator for input.
pub trait Prompter: Send + Sync {
    /// Single line of text. An empty answer yields `default` when given.
    fn text(&self, message: &str, default: Option<&str>) -> Result<String, PromptError>;

    /// Yes/no question.
    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError>;

    /// Pick one of `options`; returns its index.
    ///
    /// Implementations show the options numbered from 1 and accept either
    /// the number or the literal option (see [`parse_choice`]), asking again
    /// on anything else until the operator answers or cancels.
    fn select(&self, message: &str, options: &[String]) -> Result<usize, PromptError>;

    /// Free-form multi-line text, terminated by end of input.
    fn text_block(&self, message: &str) -> Result<String, PromptError>;
}

/// Interpret `input` as a 1-based index into `options` or one of the
/// options by name. An exact match wins; otherwise case is ignored.
pub fn parse_choice(input: &str, options: &[String]) -> Option<usize> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return (1..=options.len()).contains(&n).then(|| n - 1);
    }
    options
        .iter()
        .position(|o| o == input)
        .or_else(|| options.iter().position(|o| o.eq_ignore_ascii_case(input)))
}

/// Render `options` as the numbered list shown next to a choice prompt.
pub fn numbered(options: &[String]) -> Vec<String> {
    options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{}. {o}", i + 1))
        .collect()
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePrompter;

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
