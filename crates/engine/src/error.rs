// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the session controller

use crate::prompt::PromptError;
use llmmux_adapters::SessionError;
use llmmux_core::InvalidProvider;
use llmmux_storage::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while creating sessions and agent windows
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    HostUnavailable(String),
    #[error("session '{0}' does not exist")]
    SessionNotFound(String),
    #[error(transparent)]
    InvalidProvider(#[from] InvalidProvider),
    #[error("no tmux sessions found; create one with `llmmux start` first")]
    NoSessions,
    #[error("project root is not a directory: {}", .0.display())]
    InvalidProjectRoot(PathBuf),
    #[error("invalid session name '{0}': must be non-empty and contain no ':' or '.'")]
    InvalidSessionName(String),
    #[error("tmux error: {0}")]
    Host(#[from] SessionError),
    #[error("state store error: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl EngineError {
    /// Operator backed out at an interactive prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EngineError::Prompt(PromptError::Cancelled))
    }
}
