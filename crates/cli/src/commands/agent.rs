// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `llmmux agent` - add an agent window to a live session

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::output::{print_json, OutputFormat};
use crate::prompt::InquirePrompter;
use llmmux_adapters::{SessionAdapter, TmuxAdapter, TracedSession};
use llmmux_core::{AgentRecord, SystemClock};
use llmmux_engine::{
    check_host, AgentRequest, AgentWindowManager, AmbientContext, DuplicatePolicy,
    ParameterResolver, Prompter, TmuxContext,
};
use llmmux_storage::StateStore;

#[derive(Args, Debug, Default)]
pub struct AgentArgs {
    /// Agent window name
    #[arg(long)]
    pub name: Option<String>,

    /// LLM provider (gemini, agent, codex, claude, opencode)
    #[arg(long)]
    pub provider: Option<String>,

    /// Prompt text for the agent
    ///
    /// When omitted (and no --skill), the prompt is asked for last and
    /// read until end of input, so piped answers for the other questions
    /// must come first.
    #[arg(long)]
    pub prompt: Option<String>,

    /// Skill to reference when no prompt is given
    #[arg(long)]
    pub skill: Option<String>,

    /// Target session (default: the tmux session this runs in)
    #[arg(long)]
    pub session: Option<String>,

    /// Create the window even if one with the same name exists
    #[arg(long, conflicts_with = "no_clobber")]
    pub force: bool,

    /// Exit if a window with the same name exists
    #[arg(long)]
    pub no_clobber: bool,
}

impl AgentArgs {
    fn duplicate_policy(&self) -> DuplicatePolicy {
        if self.force {
            DuplicatePolicy::Allow
        } else if self.no_clobber {
            DuplicatePolicy::Abort
        } else {
            DuplicatePolicy::Ask
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AgentReport {
    pub session: String,
    pub window: String,
    pub command: String,
    pub duplicate: bool,
    pub record_path: Option<PathBuf>,
    pub agent: AgentRecord,
}

pub async fn handle(args: AgentArgs, store: &StateStore, format: OutputFormat) -> Result<()> {
    let sessions = TracedSession::new(TmuxAdapter::new());
    let ambient = TmuxContext::from_env(sessions.clone());
    let skill_roots = llmmux_engine::env::skill_roots();

    let outcome = execute(
        &args,
        store,
        sessions,
        &ambient,
        &InquirePrompter,
        &skill_roots,
    )
    .await?;

    match outcome {
        Some(report) => print_report(&report, format),
        None => {
            if format == OutputFormat::Text {
                println!("Cancelled");
            }
            Ok(())
        }
    }
}

/// Resolve parameters and create the agent window. `None` when the
/// operator declines a duplicate window name.
pub async fn execute<S: SessionAdapter>(
    args: &AgentArgs,
    store: &StateStore,
    sessions: S,
    ambient: &dyn AmbientContext,
    prompter: &dyn Prompter,
    skill_roots: &[PathBuf],
) -> Result<Option<AgentReport>> {
    check_host(&sessions).await?;
    let explicit_provider = ParameterResolver::explicit_provider(args.provider.as_deref())?;

    let vars = store.load_vars()?;
    let resolver = ParameterResolver::new(prompter, &vars);

    let session = resolver
        .agent_session(args.session.as_deref(), &sessions, ambient)
        .await?;
    let name = resolver.agent_name(args.name.as_deref())?;

    let manager = AgentWindowManager::new(sessions, store.clone(), SystemClock);
    let Some(policy) = manager
        .settle_duplicate(&session, &name, args.duplicate_policy(), prompter)
        .await?
    else {
        return Ok(None);
    };

    let provider = resolver.provider(explicit_provider, None)?;
    let prompt = resolver.prompt(args.prompt.as_deref(), args.skill.as_deref(), skill_roots)?;

    let request = AgentRequest {
        session: &session,
        name: &name,
        provider,
        prompt: &prompt,
    };
    let Some(created) = manager
        .create_agent_window(&request, policy, prompter, &vars)
        .await?
    else {
        return Ok(None);
    };

    Ok(Some(AgentReport {
        window: created.window.to_string(),
        command: created.command,
        duplicate: created.duplicate,
        record_path: created.record_path,
        agent: created.record,
        session,
    }))
}

fn print_report(report: &AgentReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Text => {
            let name = &report.agent.name;
            if report.duplicate {
                println!(
                    "Warning: window '{name}' already existed in session '{}'",
                    report.session
                );
            }
            println!(
                "Agent '{name}' created in session '{}' with provider '{}'",
                report.session, report.agent.provider
            );
            if report.record_path.is_none() {
                println!("Note: no state directory for this session, agent record not written");
            }
            println!();
            println!("Switch to the agent window:");
            println!("  Ctrl+b w   (then select {name})");
            println!("  Ctrl+b '   (then type {name})");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
