//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn llmmux_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn llmmux_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("start")
        .stdout_has("agent")
        .stdout_has("sessions")
        .stdout_has("attach");
}

#[test]
fn start_help_shows_flags() {
    cli()
        .args(&["start", "--help"])
        .passes()
        .stdout_has("--provider")
        .stdout_has("--session-name")
        .stdout_has("--project-root")
        .stdout_has("--on-conflict");
}

#[test]
fn agent_help_shows_flags() {
    cli()
        .args(&["agent", "--help"])
        .passes()
        .stdout_has("--name")
        .stdout_has("--prompt")
        .stdout_has("--skill")
        .stdout_has("--session")
        .stdout_has("--no-clobber");
}
