//! `llmmux start` specs

use crate::prelude::*;

#[test]
fn invalid_provider_is_rejected_without_creating_a_session() {
    let temp = Project::with_idle_tmux();
    let root = temp.path().to_string_lossy().to_string();

    let run = temp
        .llmmux()
        .args(&[
            "start",
            "--provider",
            "gpt",
            "--session-name",
            "demo",
            "--project-root",
            &root,
        ])
        .fails()
        .stderr_has("invalid provider 'gpt'")
        .stderr_has("gemini, agent, codex, claude, opencode");

    assert_eq!(run.code(), Some(1));
    assert!(!temp.home().join("state/session_index.json").exists());
    assert!(!temp.home().join(".default_env").exists());
    assert!(temp.home().join("logs/llmmux.log").exists());
}

#[test]
fn invalid_session_name_is_rejected() {
    let temp = Project::with_idle_tmux();

    temp.llmmux()
        .args(&["start", "--provider", "codex", "--session-name", "a:b"])
        .fails()
        .stderr_has("invalid session name 'a:b'");
}

#[test]
fn missing_project_root_is_rejected() {
    let temp = Project::with_idle_tmux();

    temp.llmmux()
        .args(&[
            "start",
            "--provider",
            "codex",
            "--session-name",
            "demo",
            "--project-root",
            "does-not-exist",
        ])
        .fails()
        .stderr_has("project root is not a directory");
}

#[test]
fn closed_stdin_at_a_prompt_cancels_cleanly() {
    let temp = Project::with_idle_tmux();

    temp.llmmux()
        .args(&["start"])
        .passes()
        .stderr_has("Cancelled");

    // Home is seeded before the first question
    for file in [".default_env", "INIT_ORCHESTRATOR.md", "INIT_AGENT.md"] {
        assert!(temp.home().join(file).is_file(), "{file} not seeded");
    }
    assert!(!temp.home().join("state/session_index.json").exists());
    assert!(temp.home().join("logs/llmmux.log").exists());
}
