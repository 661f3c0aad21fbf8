//! CLI error handling specs
//!
//! Verify precondition failures exit non-zero with a clear message.

use crate::prelude::*;

#[test]
fn start_without_tmux_fails_before_seeding_home() {
    let temp = Project::without_tmux();

    let run = temp
        .llmmux()
        .args(&["start", "--provider", "codex", "--session-name", "demo"])
        .fails()
        .stderr_has("Error: tmux is not installed or not in PATH");

    assert_eq!(run.code(), Some(1));
    assert!(!temp.home().join(".default_env").exists());
}

#[test]
fn agent_without_tmux_fails() {
    let temp = Project::without_tmux();

    temp.llmmux()
        .args(&["agent", "--session", "demo", "--name", "a"])
        .fails()
        .stderr_has("tmux is not installed");
}

#[test]
fn sessions_without_tmux_fails() {
    let temp = Project::without_tmux();

    temp.llmmux()
        .args(&["sessions"])
        .fails()
        .stderr_has("tmux is not installed");
}

#[test]
fn unknown_conflict_policy_is_a_usage_error() {
    cli()
        .args(&["start", "--on-conflict", "merge"])
        .fails()
        .stderr_has("invalid value 'merge'");
}
