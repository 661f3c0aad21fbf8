//! `llmmux agent` specs

use crate::prelude::*;

#[test]
fn explicit_session_that_is_not_live_fails() {
    let temp = Project::with_idle_tmux();

    let run = temp
        .llmmux()
        .args(&[
            "agent",
            "--session",
            "ghost",
            "--name",
            "reviewer",
            "--provider",
            "claude",
            "--prompt",
            "review",
        ])
        .fails()
        .stderr_has("session 'ghost' does not exist");

    assert_eq!(run.code(), Some(1));
}

#[test]
fn no_live_sessions_outside_tmux_fails() {
    let temp = Project::with_idle_tmux();

    temp.llmmux()
        .args(&["agent", "--name", "reviewer", "--provider", "claude"])
        .fails()
        .stderr_has("no tmux sessions found");
}
