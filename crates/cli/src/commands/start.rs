// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `llmmux start` - create a session with an orchestrator window

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::output::{print_json, OutputFormat};
use crate::prompt::InquirePrompter;
use llmmux_adapters::{SessionAdapter, TmuxAdapter, TracedSession};
use llmmux_core::{SystemClock, UuidIdGen};
use llmmux_engine::{
    check_host, ConflictPolicy, ParameterResolver, Prompter, SessionManager,
};
use llmmux_storage::StateStore;

#[derive(Args, Debug, Default)]
pub struct StartArgs {
    /// LLM provider (gemini, agent, codex, claude, opencode)
    #[arg(long)]
    pub provider: Option<String>,

    /// Name for the tmux session (default: llmmux)
    #[arg(long)]
    pub session_name: Option<String>,

    /// Project root directory (default: current directory)
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// What to do when a live session already has the name
    #[arg(long, value_enum, default_value_t)]
    pub on_conflict: OnConflict,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OnConflict {
    /// Ask interactively
    #[default]
    Ask,
    /// Keep the old session, create `name(k)`
    Keep,
    /// Kill the old session and start over
    Replace,
    /// Exit without doing anything
    Abort,
}

impl From<OnConflict> for ConflictPolicy {
    fn from(value: OnConflict) -> Self {
        match value {
            OnConflict::Ask => ConflictPolicy::Ask,
            OnConflict::Keep => ConflictPolicy::Keep,
            OnConflict::Replace => ConflictPolicy::Replace,
            OnConflict::Abort => ConflictPolicy::Abort,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StartReport {
    pub session: String,
    pub session_id: String,
    pub provider: String,
    pub project_root: PathBuf,
    pub state_dir: PathBuf,
    pub replaced: bool,
    /// Files seeded into a fresh home
    pub seeded: Vec<String>,
}

pub async fn handle(args: StartArgs, store: &StateStore, format: OutputFormat) -> Result<()> {
    let sessions = TracedSession::new(TmuxAdapter::new());
    let cwd = crate::env::current_dir()?;

    match execute(&args, store, sessions, &InquirePrompter, &cwd).await? {
        Some(report) => print_report(&report, format),
        None => {
            if format == OutputFormat::Text {
                println!("Exiting...");
            }
            Ok(())
        }
    }
}

/// Resolve parameters and create the session. `None` when the operator
/// quits at the name-collision prompt.
pub async fn execute<S: SessionAdapter>(
    args: &StartArgs,
    store: &StateStore,
    sessions: S,
    prompter: &dyn Prompter,
    cwd: &Path,
) -> Result<Option<StartReport>> {
    check_host(&sessions).await?;
    let explicit_provider = ParameterResolver::explicit_provider(args.provider.as_deref())?;

    let seeded = store.bootstrap()?;
    let vars = store.load_vars()?;
    let resolver = ParameterResolver::new(prompter, &vars);

    let requested = resolver.session_name(args.session_name.as_deref())?;
    let manager = SessionManager::new(sessions, store.clone(), SystemClock, UuidIdGen::new());
    let Some(plan) = manager
        .plan_name(&requested, args.on_conflict.into(), prompter)
        .await?
    else {
        return Ok(None);
    };

    let project_root = resolver.project_root(args.project_root.as_deref(), cwd)?;
    let provider = resolver.provider(explicit_provider, Some(store))?;

    let created = manager.create(&plan, &project_root, provider, &vars).await?;

    Ok(Some(StartReport {
        state_dir: store.session_dir(&created.session_id),
        session: created.name,
        session_id: created.session_id.to_string(),
        provider: provider.to_string(),
        project_root,
        replaced: created.replaced,
        seeded: seeded.into_iter().map(String::from).collect(),
    }))
}

fn print_report(report: &StartReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Text => {
            if !report.seeded.is_empty() {
                println!("Seeded llmmux home: {}", report.seeded.join(", "));
            }
            if report.replaced {
                println!("Replaced existing session '{}'", report.session);
            }
            println!(
                "Orchestrator session '{}' created with provider '{}'",
                report.session, report.provider
            );
            println!();
            println!("Attach with:");
            println!("  llmmux attach {}", report.session);
            println!();
            println!("State directory: {}", report.state_dir.display());
            println!("Session ID: {}", report.session_id);
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "start_tests.rs"]
mod tests;
