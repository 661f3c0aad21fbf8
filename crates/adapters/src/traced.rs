// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::session::{SessionAdapter, SessionError};
use async_trait::async_trait;
use llmmux_core::WindowId;
use std::path::Path;
use tracing::Instrument;

/// Wrapper that adds tracing to any SessionAdapter
#[derive(Clone)]
pub struct TracedSession<S> {
    inner: S,
}

impl<S> TracedSession<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: SessionAdapter> SessionAdapter for TracedSession<S> {
    async fn check_available(&self) -> Result<String, SessionError> {
        let result = self.inner.check_available().await;
        match &result {
            Ok(version) => tracing::debug!(version = version.as_str(), "multiplexer available"),
            Err(e) => tracing::error!(error = %e, "multiplexer unavailable"),
        }
        result
    }

    async fn has_session(&self, name: &str) -> Result<bool, SessionError> {
        let result = self.inner.has_session(name).await;
        tracing::trace!(name, exists = ?result.as_ref().ok(), "checked");
        result
    }

    async fn list_sessions(&self) -> Result<Vec<String>, SessionError> {
        let result = self.inner.list_sessions().await;
        tracing::trace!(count = result.as_ref().map(Vec::len).ok(), "listed sessions");
        result
    }

    async fn new_session(
        &self,
        name: &str,
        window: &str,
        cwd: &Path,
    ) -> Result<WindowId, SessionError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.new_session(name, window, cwd).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(id) => tracing::info!(window_id = id.as_str(), elapsed_ms, "session created"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "new_session failed"),
            }
            result
        }
        .instrument(tracing::info_span!("host.new_session", name, window, cwd = %cwd.display()))
        .await
    }

    async fn new_window(&self, session: &str, window: &str) -> Result<WindowId, SessionError> {
        async {
            let result = self.inner.new_window(session, window).await;
            match &result {
                Ok(id) => tracing::info!(window_id = id.as_str(), "window created"),
                Err(e) => tracing::error!(error = %e, "new_window failed"),
            }
            result
        }
        .instrument(tracing::info_span!("host.new_window", session, window))
        .await
    }

    async fn list_windows(&self, session: &str) -> Result<Vec<String>, SessionError> {
        let result = self.inner.list_windows(session).await;
        tracing::trace!(session, count = result.as_ref().map(Vec::len).ok(), "listed windows");
        result
    }

    async fn send_command(&self, window: &WindowId, command: &str) -> Result<(), SessionError> {
        tracing::info_span!("host.send", window = window.as_str())
            .in_scope(|| tracing::debug!(command_len = command.len(), "sending"));
        let result = self.inner.send_command(window, command).await;
        if let Err(ref e) = result {
            tracing::error!(window = window.as_str(), error = %e, "send failed");
        }
        result
    }

    async fn kill_session(&self, name: &str) -> Result<(), SessionError> {
        let result = self.inner.kill_session(name).await;
        tracing::info_span!("host.kill", name).in_scope(|| match &result {
            Ok(()) => tracing::info!("killed"),
            Err(e) => tracing::warn!(error = %e, "kill failed"),
        });
        result
    }

    async fn session_of_pane(&self, pane: &str) -> Result<Option<String>, SessionError> {
        let result = self.inner.session_of_pane(pane).await;
        tracing::debug!(pane, session = ?result.as_ref().ok(), "resolved pane");
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
