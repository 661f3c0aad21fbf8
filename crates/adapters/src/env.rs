// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

use crate::subprocess::TMUX_TIMEOUT;

/// Per-call tmux timeout: `LLMMUX_TMUX_TIMEOUT_MS` (default 10s).
pub fn tmux_timeout() -> Duration {
    std::env::var("LLMMUX_TMUX_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(TMUX_TIMEOUT)
}

