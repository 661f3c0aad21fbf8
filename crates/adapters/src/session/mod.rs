// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host session control adapters

mod tmux;

pub use tmux::TmuxAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSession, FakeSessionAdapter, FakeWindow, SessionCall};

use async_trait::async_trait;
use llmmux_core::WindowId;
use std::path::Path;
use thiserror::Error;

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("terminal multiplexer unavailable: {0}")]
    Unavailable(String),
    #[error("session not found: {0}")]
    NotFound(String),
    #[error("spawn failed: {0}")]
    SpawnFailed(String),
    #[error("command failed: {0}")]
    CommandFailed(String),
}

/// The multiplexer operations the controller depends on.
///
/// Only success/failure of each call matters; nothing here parses pane
/// content. Every call blocks on the host.
#[async_trait]
pub trait SessionAdapter: Clone + Send + Sync + 'static {
    /// Verify the multiplexer is installed and runnable; returns its version.
    async fn check_available(&self) -> Result<String, SessionError>;

    /// Whether a live session with exactly this name exists.
    async fn has_session(&self, name: &str) -> Result<bool, SessionError>;

    /// Names of all live sessions (empty when no server is running).
    async fn list_sessions(&self) -> Result<Vec<String>, SessionError>;

    /// Create a detached session with one named window rooted at `cwd`.
    async fn new_session(
        &self,
        name: &str,
        window: &str,
        cwd: &Path,
    ) -> Result<WindowId, SessionError>;

    /// Create a named window in an existing session.
    async fn new_window(&self, session: &str, window: &str) -> Result<WindowId, SessionError>;

    /// Display names of the session's windows, in index order.
    async fn list_windows(&self, session: &str) -> Result<Vec<String>, SessionError>;

    /// Type `command` into the window and press Enter. Fire-and-forget.
    async fn send_command(&self, window: &WindowId, command: &str) -> Result<(), SessionError>;

    /// Forcibly terminate a session.
    async fn kill_session(&self, name: &str) -> Result<(), SessionError>;

    /// Name of the session owning `pane`, if the pane is live.
    async fn session_of_pane(&self, pane: &str) -> Result<Option<String>, SessionError>;
}
