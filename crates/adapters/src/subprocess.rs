// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use std::io;
use std::process::Output;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Default timeout for tmux commands.
pub const TMUX_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("{description} failed: {source}")]
    Io {
        description: String,
        #[source]
        source: io::Error,
    },
    #[error("{description} timed out after {}s", timeout.as_secs())]
    TimedOut {
        description: String,
        timeout: Duration,
    },
}

impl SubprocessError {
    /// Whether the program itself could not be found on PATH.
    pub fn is_missing_binary(&self) -> bool {
        matches!(self, SubprocessError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Run a subprocess command with a timeout.
///
/// A non-zero exit status is not an error here; callers inspect
/// `Output::status`. The child is killed if the timeout elapses (via the
/// tokio `Child` drop implementation).
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, SubprocessError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(source)) => Err(SubprocessError::Io {
            description: description.to_string(),
            source,
        }),
        Err(_elapsed) => Err(SubprocessError::TimedOut {
            description: description.to_string(),
            timeout,
        }),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
