// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{TimeZone, Utc};
use llmmux_core::VarSource;
use tempfile::tempdir;

fn sid(s: &str) -> SessionId {
    SessionId::new(s)
}

fn run_state(id: &str, name: &str) -> RunState {
    RunState::new(
        sid(id),
        name,
        "/tmp/proj",
        "codex",
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
    )
}

fn record(name: &str, prompt: &str) -> AgentRecord {
    AgentRecord::running(
        name,
        "claude",
        prompt,
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
    )
}

#[test]
fn bootstrap_seeds_missing_files_once() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path().join("home"));

    let seeded = store.bootstrap().unwrap();
    assert_eq!(
        seeded,
        vec![".default_env", "INIT_ORCHESTRATOR.md", "INIT_AGENT.md"]
    );
    assert!(store.state_dir().is_dir());
    assert!(store.artifacts_root().is_dir());
    assert!(store.log_dir().is_dir());

    assert!(store.bootstrap().unwrap().is_empty());
}

#[test]
fn bootstrap_keeps_existing_files() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());
    fs::write(store.default_env_path(), "MINE=1\n").unwrap();

    let seeded = store.bootstrap().unwrap();

    assert!(!seeded.contains(&".default_env"));
    assert_eq!(
        fs::read_to_string(store.default_env_path()).unwrap(),
        "MINE=1\n"
    );
}

#[test]
fn create_session_dirs_lays_out_state_and_artifacts() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());
    let id = sid("session_20260102T030405Z_0000abcd");

    store.create_session_dirs(&id).unwrap();

    let state = dir.path().join("state/session_20260102T030405Z_0000abcd");
    let artifacts = dir.path().join("artifacts/session_20260102T030405Z_0000abcd");
    assert!(state.join("agents").is_dir());
    assert!(state.join("logs").is_dir());
    assert!(artifacts.join("patches").is_dir());
    assert!(artifacts.join("reports").is_dir());
}

#[test]
fn missing_index_is_empty_and_absent() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let loaded = store.load_index().unwrap();

    assert!(loaded.value.is_empty());
    assert_eq!(loaded.revision, Revision::Absent);
}

#[test]
fn update_index_keeps_other_entries() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());

    store
        .update_index(|index| {
            index.insert("demo", sid("a"));
        })
        .unwrap();
    let index = store
        .update_index(|index| {
            index.insert("demo(1)", sid("b"));
        })
        .unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(store.load_index().unwrap().value, index);
}

#[test]
fn update_index_reapplies_after_concurrent_write() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());
    let other = store.clone();

    let mut calls = 0;
    let index = store
        .update_index(|index| {
            calls += 1;
            if calls == 1 {
                // Another controller writes between our read and write.
                let mut theirs = SessionIndex::new();
                theirs.insert("theirs", sid("t"));
                other.save_index(&theirs, None).unwrap();
            }
            index.insert("ours", sid("o"));
        })
        .unwrap();

    assert_eq!(calls, 2);
    assert_eq!(index.get("theirs"), Some(&sid("t")));
    assert_eq!(index.get("ours"), Some(&sid("o")));
}

#[test]
fn update_index_gives_up_after_repeated_conflicts() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());
    let other = store.clone();

    let mut calls = 0u32;
    let err = store
        .update_index(|index| {
            calls += 1;
            let mut theirs = SessionIndex::new();
            theirs.insert(format!("theirs-{calls}"), sid("t"));
            other.save_index(&theirs, None).unwrap();
            index.insert("ours", sid("o"));
        })
        .unwrap_err();

    assert!(matches!(err, StoreError::Conflict { .. }));
    assert_eq!(calls, MAX_UPDATE_ATTEMPTS);
}

#[test]
fn concurrent_index_updates_lose_nothing_that_reported_success() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let outcomes: Vec<Result<SessionIndex, StoreError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                scope.spawn(move || {
                    (0..50)
                        .map(|i| {
                            store.update_index(|index| {
                                index.insert(format!("s{t}_{i}"), sid(&format!("{t}-{i}")));
                            })
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let succeeded = outcomes.iter().filter(|r| r.is_ok()).count();
    for err in outcomes.iter().filter_map(|r| r.as_ref().err()) {
        assert!(matches!(err, StoreError::Conflict { .. }), "{err}");
    }
    assert_eq!(store.load_index().unwrap().value.len(), succeeded);

    let backups: Vec<_> = std::fs::read_dir(store.state_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|name| name.contains(".bak"))
        .collect();
    assert!(backups.is_empty(), "{backups:?}");
}

#[test]
fn run_state_round_trips_through_store() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());
    let state = run_state("s1", "demo");

    store.save_run_state(&state, Some(&Revision::Absent)).unwrap();

    let loaded = store.load_run_state(&sid("s1")).unwrap().unwrap();
    assert_eq!(loaded.value, state);
    assert!(store.run_state_path(&sid("s1")).ends_with("state/s1/run_state.json"));
}

#[test]
fn update_run_state_without_document_is_noop() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let updated = store
        .update_run_state(&sid("missing"), |_| panic!("must not be called"))
        .unwrap();

    assert!(!updated);
    assert!(!store.run_state_path(&sid("missing")).exists());
}

#[test]
fn update_run_state_preserves_unknown_fields() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());
    let path = store.run_state_path(&sid("s1"));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        r#"{
  "run_id": "s1",
  "timestamp": "2026-01-02T03:04:05Z",
  "repo_root": "/tmp/proj",
  "tmux_session_name": "demo",
  "provider": "codex",
  "agents": {},
  "artifacts": ["patch-1"],
  "task_queue": [],
  "constraints": [],
  "notes": {"owner": "orchestrator"}
}"#,
    )
    .unwrap();

    let updated = store
        .update_run_state(&sid("s1"), |state| {
            state.upsert_agent(record("coder", "go"));
        })
        .unwrap();
    assert!(updated);

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["notes"]["owner"], "orchestrator");
    assert_eq!(raw["artifacts"][0], "patch-1");
    assert_eq!(raw["agents"]["coder"]["status"], "running");
}

#[test]
fn agent_record_skipped_without_agents_dir() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let written = store
        .write_agent_record(&sid("s1"), &record("coder", "go"))
        .unwrap();

    assert!(written.is_none());
    assert!(!store.agents_dir(&sid("s1")).exists());
}

#[test]
fn agent_record_later_write_wins() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());
    let id = sid("s1");
    store.create_session_dirs(&id).unwrap();

    store.write_agent_record(&id, &record("coder", "first")).unwrap();
    let path = store
        .write_agent_record(&id, &record("coder", "second"))
        .unwrap()
        .unwrap();

    assert!(path.ends_with("agents/coder.last.json"));
    let read = store.read_agent_record(&id, "coder").unwrap().unwrap();
    assert_eq!(read.prompt, "second");
}

#[test]
fn agent_names_with_separators_stay_in_agents_dir() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());

    let path = store.agent_record_path(&sid("s1"), "../escape");

    assert_eq!(path.parent(), Some(store.agents_dir(&sid("s1")).as_path()));
}

#[test]
fn user_env_overrides_default_env() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());
    fs::write(
        store.default_env_path(),
        "LLMMUX_TEST_ONLY_KEY=default\nLLMMUX_TEST_ONLY_OTHER=default\n",
    )
    .unwrap();
    fs::write(store.user_env_path(), "LLMMUX_TEST_ONLY_KEY=user\n").unwrap();

    let vars = store.load_vars().unwrap();

    assert_eq!(vars.var("LLMMUX_TEST_ONLY_KEY").as_deref(), Some("user"));
    assert_eq!(
        vars.var("LLMMUX_TEST_ONLY_OTHER").as_deref(),
        Some("default")
    );
}

#[test]
fn save_user_var_is_visible_to_load_vars() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());

    store
        .save_user_var("LLMMUX_TEST_ONLY_PROVIDER", "gemini")
        .unwrap();

    let vars = store.load_vars().unwrap();
    assert_eq!(
        vars.var("LLMMUX_TEST_ONLY_PROVIDER").as_deref(),
        Some("gemini")
    );
}
