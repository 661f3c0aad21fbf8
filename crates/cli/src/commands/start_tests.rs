// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use llmmux_adapters::FakeSessionAdapter;
use llmmux_engine::{EngineError, FakePrompter};
use tempfile::{tempdir, TempDir};

struct Fixture {
    _dir: TempDir,
    store: StateStore,
    cwd: PathBuf,
    sessions: FakeSessionAdapter,
}

fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let cwd = dir.path().join("proj");
    std::fs::create_dir_all(&cwd).unwrap();
    Fixture {
        store: StateStore::new(dir.path().join("home")),
        cwd,
        sessions: FakeSessionAdapter::new(),
        _dir: dir,
    }
}

fn args(provider: &str, name: &str) -> StartArgs {
    StartArgs {
        provider: Some(provider.to_string()),
        session_name: Some(name.to_string()),
        project_root: None,
        on_conflict: OnConflict::Ask,
    }
}

#[tokio::test]
async fn explicit_arguments_need_no_prompts() {
    let f = fixture();
    let prompter = FakePrompter::new();

    let report = execute(
        &StartArgs {
            project_root: Some(f.cwd.clone()),
            ..args("codex", "demo")
        },
        &f.store,
        f.sessions.clone(),
        &prompter,
        &f.cwd,
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(report.session, "demo");
    assert_eq!(report.provider, "codex");
    assert_eq!(report.project_root, f.cwd.canonicalize().unwrap());
    assert!(report.session_id.starts_with("session_"));
    assert_eq!(
        report.seeded,
        vec![".default_env", "INIT_ORCHESTRATOR.md", "INIT_AGENT.md"]
    );
    assert!(prompter.asked().is_empty());

    let session = f.sessions.get_session("demo").unwrap();
    let sent = &session.windows[0].sent;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("codex 'orchestrator agent: refer to "));
    assert!(sent[0].ends_with("INIT_ORCHESTRATOR.md'"));
}

#[tokio::test]
async fn missing_tmux_fails_before_touching_home() {
    let f = fixture();
    f.sessions.set_available(false);

    let err = execute(
        &args("codex", "demo"),
        &f.store,
        f.sessions.clone(),
        &FakePrompter::new(),
        &f.cwd,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::HostUnavailable(_))
    ));
    assert!(!f.store.home().exists());
}

#[tokio::test]
async fn invalid_provider_creates_nothing() {
    let f = fixture();
    let prompter = FakePrompter::new();

    let err = execute(
        &args("gpt", "demo"),
        &f.store,
        f.sessions.clone(),
        &prompter,
        &f.cwd,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::InvalidProvider(_))
    ));
    assert!(prompter.asked().is_empty());
    assert!(f.sessions.session_names().is_empty());
    assert!(!f.store.home().exists());
}

#[tokio::test]
async fn invalid_provider_is_rejected_before_the_conflict_question() {
    let f = fixture();
    f.sessions.add_session("demo", &["orchestrator"]);
    let prompter = FakePrompter::new();

    let err = execute(
        &args("gpt", "demo"),
        &f.store,
        f.sessions.clone(),
        &prompter,
        &f.cwd,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::InvalidProvider(e)) if e.given == "gpt"
    ));
    assert!(prompter.asked().is_empty());
    assert!(!f.store.home().exists());
    assert_eq!(f.sessions.session_names(), vec!["demo".to_string()]);
}

#[tokio::test]
async fn abort_on_conflict_returns_none() {
    let f = fixture();
    f.sessions.add_session("demo", &["orchestrator"]);

    let outcome = execute(
        &StartArgs {
            on_conflict: OnConflict::Abort,
            ..args("codex", "demo")
        },
        &f.store,
        f.sessions.clone(),
        &FakePrompter::new(),
        &f.cwd,
    )
    .await
    .unwrap();

    assert!(outcome.is_none());
    assert_eq!(f.sessions.session_names(), vec!["demo"]);
}

#[tokio::test]
async fn keep_on_conflict_uses_suffix() {
    let f = fixture();
    f.sessions.add_session("demo", &["orchestrator"]);
    let prompter = FakePrompter::with_replies([""]);

    let report = execute(
        &StartArgs {
            on_conflict: OnConflict::Keep,
            ..args("claude", "demo")
        },
        &f.store,
        f.sessions.clone(),
        &prompter,
        &f.cwd,
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(report.session, "demo(1)");
    assert_eq!(f.sessions.session_names(), vec!["demo", "demo(1)"]);
}

#[tokio::test]
async fn interactive_start_can_save_default_provider() {
    let f = fixture();
    // name, project root, provider, save as default
    let prompter = FakePrompter::with_replies(["", "", "3", "y"]);

    let report = execute(
        &StartArgs::default(),
        &f.store,
        f.sessions.clone(),
        &prompter,
        &f.cwd,
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(report.session, "llmmux");
    assert_eq!(report.provider, "codex");
    let env = std::fs::read_to_string(f.store.user_env_path()).unwrap();
    assert!(env.starts_with("LLMMUX_DEFAULT_PROVIDER=codex\n"));
}

#[yare::parameterized(
    ask     = { OnConflict::Ask,     ConflictPolicy::Ask },
    keep    = { OnConflict::Keep,    ConflictPolicy::Keep },
    replace = { OnConflict::Replace, ConflictPolicy::Replace },
    abort   = { OnConflict::Abort,   ConflictPolicy::Abort },
)]
fn on_conflict_maps_to_policy(flag: OnConflict, policy: ConflictPolicy) {
    assert_eq!(ConflictPolicy::from(flag), policy);
}
