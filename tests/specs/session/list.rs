//! `llmmux sessions` specs

use crate::prelude::*;

#[test]
fn empty_home_lists_no_sessions() {
    let temp = Project::with_idle_tmux();

    temp.llmmux()
        .args(&["sessions"])
        .passes()
        .stdout_eq("No sessions\n");
}

#[test]
fn empty_home_lists_empty_json_array() {
    let temp = Project::with_idle_tmux();

    let run = temp.llmmux().args(&["sessions", "-o", "json"]).passes();

    let rows: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(rows, serde_json::json!([]));
}

#[test]
fn ledger_entry_without_live_session_is_stale() {
    let temp = Project::with_idle_tmux();
    let index = temp.home().join("state/session_index.json");
    std::fs::create_dir_all(index.parent().unwrap()).unwrap();
    std::fs::write(
        &index,
        r#"{"demo": "session_20260304T050607Z_0a1b2c3d"}"#,
    )
    .unwrap();

    temp.llmmux()
        .args(&["sessions"])
        .passes()
        .stdout_eq(
            "\
NAME  SESSION ID                         STATUS  PROVIDER  AGENTS
demo  session_20260304T050607Z_0a1b2c3d  stale   -         0
",
        );
}
