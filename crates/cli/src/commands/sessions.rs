// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `llmmux sessions` - list ledger entries with their liveness

use std::collections::HashSet;
use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

use crate::output::{print_json, OutputFormat};
use llmmux_adapters::{SessionAdapter, TmuxAdapter, TracedSession};
use llmmux_engine::check_host;
use llmmux_storage::StateStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRow {
    pub name: String,
    pub session_id: String,
    /// The host still has a session with this name
    pub live: bool,
    /// From the run state; `None` when it is missing
    pub provider: Option<String>,
    pub agents: usize,
}

pub async fn handle(store: &StateStore, format: OutputFormat) -> Result<()> {
    let rows = list(store, &TracedSession::new(TmuxAdapter::new())).await?;
    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Text => {
            format_session_list(&mut io::stdout().lock(), &rows)?;
            Ok(())
        }
    }
}

/// One row per Session Index entry. Entries whose host session is gone
/// are reported as stale rather than dropped.
pub async fn list<S: SessionAdapter>(store: &StateStore, sessions: &S) -> Result<Vec<SessionRow>> {
    check_host(sessions).await?;
    let live: HashSet<String> = sessions.list_sessions().await?.into_iter().collect();

    let index = store.load_index()?.value;
    let mut rows = Vec::with_capacity(index.len());
    for (name, id) in index.iter() {
        let state = store.load_run_state(id)?.map(|v| v.value);
        rows.push(SessionRow {
            name: name.to_string(),
            session_id: id.to_string(),
            live: live.contains(name),
            provider: state.as_ref().map(|s| s.provider.clone()),
            agents: state.map_or(0, |s| s.agents.len()),
        });
    }
    Ok(rows)
}

pub fn format_session_list(w: &mut impl Write, rows: &[SessionRow]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(w, "No sessions");
    }

    let header = ["NAME", "SESSION ID", "STATUS", "PROVIDER", "AGENTS"];
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.session_id.clone(),
                if r.live { "live" } else { "stale" }.to_string(),
                r.provider.clone().unwrap_or_else(|| "-".to_string()),
                r.agents.to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(w, &header.map(String::from), &widths)?;
    for row in &cells {
        write_row(w, row, &widths)?;
    }
    Ok(())
}

fn write_row(w: &mut impl Write, cells: &[String; 5], widths: &[usize; 5]) -> io::Result<()> {
    let last = cells.len() - 1;
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            line.push_str(cell);
        } else {
            line.push_str(&format!("{cell:<width$}  "));
        }
    }
    writeln!(w, "{}", line.trim_end())
}

#[cfg(test)]
#[path = "sessions_tests.rs"]
mod tests;
