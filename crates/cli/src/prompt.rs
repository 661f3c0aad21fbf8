// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal prompter built on `inquire`, with plain line prompts when
//! stdin is not a terminal (piped answers).

use inquire::validator::Validation;
use inquire::{Confirm, CustomUserError, InquireError, Text};
use llmmux_engine::prompt::{numbered, parse_choice};
use llmmux_engine::{PromptError, Prompter};
use std::io::{self, BufRead, IsTerminal, Read, Write};

#[derive(Clone, Copy, Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn text(&self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        if !interactive() {
            return plain_text(message, default);
        }
        let mut prompt = Text::new(message);
        if let Some(d) = default {
            prompt = prompt.with_default(d);
        }
        match prompt.prompt() {
            Ok(v) => Ok(v),
            Err(InquireError::NotTTY) => plain_text(message, default),
            Err(e) => Err(map_error(e)),
        }
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        if !interactive() {
            return plain_confirm(message, default);
        }
        match Confirm::new(message).with_default(default).prompt() {
            Ok(v) => Ok(v),
            Err(InquireError::NotTTY) => plain_confirm(message, default),
            Err(e) => Err(map_error(e)),
        }
    }

    fn select(&self, message: &str, options: &[String]) -> Result<usize, PromptError> {
        eprintln!("{message}:");
        for line in numbered(options) {
            eprintln!("  {line}");
        }
        if !interactive() {
            return plain_choice(options);
        }

        let choices = options.to_vec();
        let validator = move |input: &str| -> Result<Validation, CustomUserError> {
            Ok(if parse_choice(input, &choices).is_some() {
                Validation::Valid
            } else {
                Validation::Invalid("Enter a number from the list or one of its names".into())
            })
        };

        let input = match Text::new("Choice (name or number):")
            .with_validator(validator)
            .prompt()
        {
            Ok(v) => v,
            Err(InquireError::NotTTY) => return plain_choice(options),
            Err(e) => return Err(map_error(e)),
        };

        parse_choice(&input, options)
            .ok_or_else(|| PromptError::Failed(format!("invalid choice '{input}'")))
    }

    fn text_block(&self, message: &str) -> Result<String, PromptError> {
        eprintln!("{message}:");
        let mut buf = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut buf)
            .map_err(|e| PromptError::Failed(e.to_string()))?;
        Ok(buf)
    }
}

/// Piped stdin gets line prompts instead of the terminal UI.
fn interactive() -> bool {
    io::stdin().is_terminal()
}

fn plain_text(message: &str, default: Option<&str>) -> Result<String, PromptError> {
    let hint = default.map(|d| format!(" [{d}]")).unwrap_or_default();
    let input = ask_line(&format!("{message}{hint}: "))?;
    match (input.as_str(), default) {
        ("", Some(d)) => Ok(d.to_string()),
        _ => Ok(input),
    }
}

fn plain_confirm(message: &str, default: bool) -> Result<bool, PromptError> {
    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        let input = ask_line(&format!("{message} [{hint}]: "))?;
        match input.to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => eprintln!("Please answer y or n."),
        }
    }
}

fn plain_choice(options: &[String]) -> Result<usize, PromptError> {
    loop {
        let input = ask_line("Choice (name or number): ")?;
        if let Some(index) = parse_choice(&input, options) {
            return Ok(index);
        }
        eprintln!("Invalid choice. Choose from: {}", options.join(", "));
    }
}

fn map_error(err: InquireError) -> PromptError {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            PromptError::Cancelled
        }
        other => PromptError::Failed(other.to_string()),
    }
}

/// Print `prompt` on stderr and read one trimmed line. End of input counts
/// as cancellation.
fn ask_line(prompt: &str) -> Result<String, PromptError> {
    eprint!("{prompt}");
    io::stderr()
        .flush()
        .map_err(|e| PromptError::Failed(e.to_string()))?;
    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| PromptError::Failed(e.to_string()))?;
    if read == 0 {
        return Err(PromptError::Cancelled);
    }
    Ok(line.trim().to_string())
}
