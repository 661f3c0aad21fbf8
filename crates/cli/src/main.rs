// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! llmmux - tmux sessions and agent windows for LLM CLIs

mod commands;
mod env;
mod exit_error;
mod logging;
mod output;
mod prompt;

use output::OutputFormat;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{agent, attach, sessions, start};
use llmmux_engine::{EngineError, PromptError};
use llmmux_storage::StateStore;

#[derive(Parser)]
#[command(
    name = "llmmux",
    version,
    about = "llmmux - run LLM agents in tmux sessions"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a session with an orchestrator window
    Start(start::StartArgs),
    /// Add an agent window to a live session
    Agent(agent::AgentArgs),
    /// List known sessions and whether they are still live
    Sessions,
    /// Attach the terminal to a session
    Attach(attach::AttachArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Start(_) => "start",
            Commands::Agent(_) => "agent",
            Commands::Sessions => "sessions",
            Commands::Attach(_) => "attach",
        }
    }
}

fn cli_command() -> clap::Command {
    Cli::command()
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        if is_cancelled(&e) {
            eprintln!("Cancelled");
            return;
        }
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// An interrupted prompt is a normal way to leave.
fn is_cancelled(err: &anyhow::Error) -> bool {
    err.downcast_ref::<EngineError>()
        .is_some_and(EngineError::is_cancelled)
        || matches!(
            err.downcast_ref::<PromptError>(),
            Some(PromptError::Cancelled)
        )
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains every source message, the
/// "Caused by" chain is skipped. Otherwise the full chain is rendered.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        cli_command().print_help()?;
        println!();
        return Ok(());
    };

    let store = StateStore::new(env::llmmux_home()?);
    let _guard = logging::setup_logging(&store.log_dir())?;
    tracing::debug!(home = %store.home().display(), command = command.name(), "llmmux invoked");

    match command {
        Commands::Start(args) => start::handle(args, &store, format).await,
        Commands::Agent(args) => agent::handle(args, &store, format).await,
        Commands::Sessions => sessions::handle(&store, format).await,
        Commands::Attach(args) => attach::handle(args),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
