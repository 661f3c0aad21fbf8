// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ambient execution context: which live session the caller is running in.

use crate::error::EngineError;
use async_trait::async_trait;
use llmmux_adapters::SessionAdapter;
use tracing::debug;

#[async_trait]
pub trait AmbientContext: Send + Sync {
    /// Name of the live session the calling process runs inside, if any.
    async fn current_session(&self) -> Result<Option<String>, EngineError>;
}

/// Detects the session from the caller's tmux pane.
#[derive(Clone)]
pub struct TmuxContext<S> {
    sessions: S,
    pane: Option<String>,
}

impl<S: SessionAdapter> TmuxContext<S> {
    /// Context for the given pane (`TMUX_PANE`), or none outside tmux.
    pub fn new(sessions: S, pane: Option<String>) -> Self {
        Self { sessions, pane }
    }

    /// Context of the current process.
    pub fn from_env(sessions: S) -> Self {
        Self::new(sessions, crate::env::tmux_pane())
    }
}

#[async_trait]
impl<S: SessionAdapter> AmbientContext for TmuxContext<S> {
    async fn current_session(&self) -> Result<Option<String>, EngineError> {
        let Some(pane) = &self.pane else {
            return Ok(None);
        };
        let session = self.sessions.session_of_pane(pane).await?;
        debug!(pane = %pane, session = ?session, "ambient session");
        Ok(session)
    }
}

/// Fixed answer, for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Default)]
pub struct FakeContext(pub Option<String>);

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl AmbientContext for FakeContext {
    async fn current_session(&self) -> Result<Option<String>, EngineError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
