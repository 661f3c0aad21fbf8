// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dotenv-style install config files (`.default_env`, `.env`).

use std::collections::BTreeMap;
use std::path::Path;

/// Parse a dotenv-style file into key-value pairs.
/// Returns an empty map if the file doesn't exist.
pub fn read_env_file(path: &Path) -> std::io::Result<BTreeMap<String, String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e),
    };
    Ok(parse_env(&content))
}

/// Parse dotenv content: `KEY=VALUE` lines, `#` comments, optional
/// `export ` prefix, and one layer of matching quotes around the value.
pub fn parse_env(content: &str) -> BTreeMap<String, String> {
    content.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value.trim()).to_string()))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Set `key=value` as the first line of the file, keeping every other line
/// (comments included) in its original order and dropping prior
/// assignments of `key`.
pub fn set_env_var(path: &Path, key: &str, value: &str) -> std::io::Result<()> {
    let existing = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    let mut out = format!("{key}={value}\n");
    for line in existing.lines() {
        let assigns_key = parse_line(line).is_some_and(|(k, _)| k == key);
        if !assigns_key {
            out.push_str(line);
            out.push('\n');
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, out)
}

#[cfg(test)]
#[path = "env_file_tests.rs"]
mod tests;
