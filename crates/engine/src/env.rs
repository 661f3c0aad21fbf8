// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment access for the engine crate.

use std::path::PathBuf;

/// Install config key naming the provider offered by default.
pub const DEFAULT_PROVIDER_VAR: &str = "LLMMUX_DEFAULT_PROVIDER";

/// Provider config directories searched for skills, in order.
const SKILL_HOMES: [&str; 4] = [".cursor", ".claude", ".gemini", ".codex"];

/// Pane of the calling process when it runs inside tmux.
pub fn tmux_pane() -> Option<String> {
    std::env::var("TMUX_PANE").ok().filter(|s| !s.is_empty())
}

/// `~/.cursor/skills`, `~/.claude/skills`, `~/.gemini/skills`, `~/.codex/skills`.
pub fn skill_roots() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    SKILL_HOMES
        .iter()
        .map(|dir| home.join(dir).join("skills"))
        .collect()
}
