// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Resolve the llmmux home: LLMMUX_HOME > ~/.llmmux
pub fn llmmux_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("LLMMUX_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("cannot determine home directory; set LLMMUX_HOME")?;
    Ok(home.join(".llmmux"))
}

pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("cannot read current directory")
}
