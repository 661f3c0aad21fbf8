// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `llmmux attach` - attach the terminal to a session

use anyhow::{Context, Result};
use clap::Args;

use crate::exit_error::ExitError;

#[derive(Args, Debug)]
pub struct AttachArgs {
    /// Session name
    pub name: String,
}

pub fn handle(args: AttachArgs) -> Result<()> {
    let status = std::process::Command::new("tmux")
        .args(attach_args(&args.name))
        .status()
        .context("failed to run tmux")?;

    if !status.success() {
        return Err(ExitError::new(
            status.code().unwrap_or(1),
            format!("failed to attach to session '{}'", args.name),
        )
        .into());
    }
    Ok(())
}

/// Exact-match target, so `demo` never attaches to `demo(1)`.
fn attach_args(name: &str) -> [String; 3] {
    ["attach".to_string(), "-t".to_string(), format!("={name}")]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_targets_exact_name() {
        assert_eq!(attach_args("demo(1)"), ["attach", "-t", "=demo(1)"]);
    }
}
