// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tmux session adapter

use super::{SessionAdapter, SessionError};
use crate::subprocess::{run_with_timeout, SubprocessError};
use async_trait::async_trait;
use llmmux_core::WindowId;
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Tmux-based session adapter
#[derive(Clone)]
pub struct TmuxAdapter {
    timeout: Duration,
}

impl TmuxAdapter {
    pub fn new() -> Self {
        Self {
            timeout: crate::env::tmux_timeout(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn run(&self, args: &[&str], description: &str) -> Result<Output, SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(args);
        run_with_timeout(cmd, self.timeout, description)
            .await
            .map_err(map_subprocess_error)
    }

    /// Run a tmux command, returning `NotFound` for its `-t` target on failure.
    async fn run_targeted(&self, args: &[&str], description: &str) -> Result<Output, SessionError> {
        let output = self.run(args, description).await?;
        if !output.status.success() {
            let target = args
                .windows(2)
                .find(|w| w[0] == "-t")
                .map(|w| w[1].trim_start_matches('=').trim_end_matches(':'))
                .unwrap_or("unknown");
            return Err(SessionError::NotFound(target.to_string()));
        }
        Ok(output)
    }
}

impl Default for TmuxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionAdapter for TmuxAdapter {
    async fn check_available(&self) -> Result<String, SessionError> {
        let output = self.run(&["-V"], "tmux -V").await?;
        if !output.status.success() {
            return Err(SessionError::Unavailable(stderr_of(&output)));
        }
        Ok(stdout_of(&output).trim().to_string())
    }

    async fn has_session(&self, name: &str) -> Result<bool, SessionError> {
        let target = exact(name);
        let output = self
            .run(&["has-session", "-t", &target], "tmux has-session")
            .await?;
        Ok(output.status.success())
    }

    async fn list_sessions(&self) -> Result<Vec<String>, SessionError> {
        let output = self
            .run(&["list-sessions", "-F", "#{session_name}"], "tmux list-sessions")
            .await?;
        // No server running means no sessions
        if !output.status.success() {
            return Ok(Vec::new());
        }
        Ok(lines_of(&output))
    }

    async fn new_session(
        &self,
        name: &str,
        window: &str,
        cwd: &Path,
    ) -> Result<WindowId, SessionError> {
        // Precondition: cwd must exist
        if !cwd.is_dir() {
            return Err(SessionError::SpawnFailed(format!(
                "working directory does not exist: {}",
                cwd.display()
            )));
        }

        let cwd = cwd.to_string_lossy();
        let output = self
            .run(
                &[
                    "new-session",
                    "-d",
                    "-s",
                    name,
                    "-n",
                    window,
                    "-c",
                    &cwd,
                    "-P",
                    "-F",
                    "#{window_id}",
                ],
                "tmux new-session",
            )
            .await?;

        if !output.status.success() {
            let stderr = stderr_of(&output);
            tracing::error!(session = name, stderr = %stderr, "tmux new-session failed");
            return Err(SessionError::SpawnFailed(stderr));
        }

        window_id_from(&output)
    }

    async fn new_window(&self, session: &str, window: &str) -> Result<WindowId, SessionError> {
        let target = format!("{}:", exact(session));
        let output = self
            .run_targeted(
                &[
                    "new-window",
                    "-t",
                    &target,
                    "-n",
                    window,
                    "-P",
                    "-F",
                    "#{window_id}",
                ],
                "tmux new-window",
            )
            .await?;
        window_id_from(&output)
    }

    async fn list_windows(&self, session: &str) -> Result<Vec<String>, SessionError> {
        let target = exact(session);
        let output = self
            .run_targeted(
                &["list-windows", "-t", &target, "-F", "#{window_name}"],
                "tmux list-windows",
            )
            .await?;
        Ok(lines_of(&output))
    }

    async fn send_command(&self, window: &WindowId, command: &str) -> Result<(), SessionError> {
        // -l = literal mode (no key name interpretation)
        // -- = end of options (handles text starting with -)
        self.run_targeted(
            &["send-keys", "-t", window.as_str(), "-l", "--", command],
            "tmux send-keys literal",
        )
        .await?;
        self.run_targeted(
            &["send-keys", "-t", window.as_str(), "Enter"],
            "tmux send-keys enter",
        )
        .await?;
        Ok(())
    }

    async fn kill_session(&self, name: &str) -> Result<(), SessionError> {
        let target = exact(name);
        self.run_targeted(&["kill-session", "-t", &target], "tmux kill-session")
            .await?;
        Ok(())
    }

    async fn session_of_pane(&self, pane: &str) -> Result<Option<String>, SessionError> {
        let output = self
            .run(
                &["display-message", "-p", "-t", pane, "#{session_name}"],
                "tmux display-message",
            )
            .await?;
        if !output.status.success() {
            return Ok(None);
        }
        let name = stdout_of(&output).trim().to_string();
        Ok(Some(name).filter(|n| !n.is_empty()))
    }
}

/// Exact-match target syntax; plain `-t name` would also match prefixes.
fn exact(name: &str) -> String {
    format!("={}", name)
}

fn map_subprocess_error(err: SubprocessError) -> SessionError {
    if err.is_missing_binary() {
        SessionError::Unavailable("tmux is not installed or not in PATH".to_string())
    } else {
        SessionError::CommandFailed(err.to_string())
    }
}

fn window_id_from(output: &Output) -> Result<WindowId, SessionError> {
    let id = stdout_of(output).trim().to_string();
    if id.is_empty() {
        return Err(SessionError::CommandFailed(
            "tmux did not report a window id".to_string(),
        ));
    }
    Ok(WindowId::new(id))
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

fn lines_of(output: &Output) -> Vec<String> {
    stdout_of(output)
        .lines()
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "tmux_tests.rs"]
mod tests;
