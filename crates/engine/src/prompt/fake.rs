// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted prompter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{parse_choice, PromptError, Prompter};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Reply {
    Input(String),
    Cancel,
}

#[derive(Default)]
struct FakePrompterState {
    replies: VecDeque<Reply>,
    asked: Vec<String>,
}

/// Answers prompts from a queue of raw operator input.
///
/// Replies are consumed in order regardless of prompt kind. Confirm
/// accepts `y`/`yes`/`n`/`no` (empty means the default); select accepts
/// what [`parse_choice`] accepts and consumes further replies on invalid
/// input, as a terminal would re-ask.
#[derive(Clone, Default)]
pub struct FakePrompter {
    inner: Arc<Mutex<FakePrompterState>>,
}

impl FakePrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompter that answers each prompt with the next of `replies`.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prompter = Self::new();
        for reply in replies {
            prompter.reply(reply);
        }
        prompter
    }

    /// Queue raw input for the next prompt.
    pub fn reply(&self, input: impl Into<String>) -> &Self {
        self.inner.lock().replies.push_back(Reply::Input(input.into()));
        self
    }

    /// Queue an interrupt for the next prompt.
    pub fn cancel(&self) -> &Self {
        self.inner.lock().replies.push_back(Reply::Cancel);
        self
    }

    /// Messages of every prompt shown so far (re-asks included).
    pub fn asked(&self) -> Vec<String> {
        self.inner.lock().asked.clone()
    }

    /// Replies not consumed yet.
    pub fn remaining(&self) -> usize {
        self.inner.lock().replies.len()
    }

    fn next(&self, message: &str) -> Result<String, PromptError> {
        let mut inner = self.inner.lock();
        inner.asked.push(message.to_string());
        match inner.replies.pop_front() {
            Some(Reply::Input(s)) => Ok(s),
            Some(Reply::Cancel) => Err(PromptError::Cancelled),
            None => Err(PromptError::Failed(format!(
                "no scripted reply for: {message}"
            ))),
        }
    }
}

impl Prompter for FakePrompter {
    fn text(&self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        let input = self.next(message)?;
        match (input.trim(), default) {
            ("", Some(d)) => Ok(d.to_string()),
            (s, _) => Ok(s.to_string()),
        }
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        loop {
            let input = self.next(message)?;
            match input.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => continue,
            }
        }
    }

    fn select(&self, message: &str, options: &[String]) -> Result<usize, PromptError> {
        loop {
            let input = self.next(message)?;
            if let Some(index) = parse_choice(&input, options) {
                return Ok(index);
            }
        }
    }

    fn text_block(&self, message: &str) -> Result<String, PromptError> {
        self.next(message)
    }
}
