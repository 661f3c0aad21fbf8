// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON document persistence with revision tokens.
//!
//! Every document in the state store is read whole and rewritten whole.
//! Reads hand back a [`Revision`] fingerprint of the bytes on disk; a write
//! that names the revision it started from fails with
//! [`StoreError::Conflict`] if someone else rewrote the file in between.
//! Only the final compare-and-rename is locked; the read-modify-write
//! cycle itself stays optimistic.

use crate::StoreError;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

/// Fingerprint of a document as last read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// The document did not exist
    Absent,
    /// SHA-256 of the document bytes
    Digest([u8; 32]),
}

impl Revision {
    fn of(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Revision::Digest(out)
    }

    /// Revision of whatever is currently on disk at `path`.
    fn current(path: &Path) -> Result<Self, StoreError> {
        match fs::read(path) {
            Ok(bytes) => Ok(Revision::of(&bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Revision::Absent),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Absent => f.write_str("absent"),
            Revision::Digest(d) => {
                for b in &d[..6] {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// A value together with the revision it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub value: T,
    pub revision: Revision,
}

/// Load a document. Missing files yield `None`.
///
/// A document that fails to parse is moved aside to a rotating `.bak`
/// file and reported as absent, so one bad write never wedges the store.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Option<Versioned<T>>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Some(Versioned {
            value,
            revision: Revision::of(&bytes),
        })),
        Err(e) => {
            let bak_path = rotate_bak_path(path);
            warn!(
                error = %e,
                path = %path.display(),
                bak = %bak_path.display(),
                "Corrupt document, moving to .bak and starting fresh",
            );
            fs::rename(path, &bak_path).map_err(|e| StoreError::io(path, e))?;
            Ok(None)
        }
    }
}

/// Save a document atomically (unique temp file in the same directory,
/// then rename).
///
/// When `expected` is given, the write is refused if the file's current
/// revision differs. The revision check and the rename happen under an
/// exclusive lock on a sidecar `.lock` file, so two writers holding the
/// same revision cannot both succeed. Returns the revision of the newly
/// written bytes.
pub fn save<T: Serialize>(
    path: &Path,
    value: &T,
    expected: Option<&Revision>,
) -> Result<Revision, StoreError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;

    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
    tmp.write_all(&bytes)
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(tmp.path(), e))?;

    let lock_path = path.with_extension("lock");
    let lock = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(|e| StoreError::io(&lock_path, e))?;
    lock.lock_exclusive()
        .map_err(|e| StoreError::io(&lock_path, e))?;

    if let Some(expected) = expected {
        let found = Revision::current(path)?;
        if &found != expected {
            return Err(StoreError::Conflict {
                path: path.to_path_buf(),
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }
    tmp.persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;
    drop(lock);

    Ok(Revision::of(&bytes))
}

const MAX_BAK_FILES: u32 = 3;

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
///
/// Keeps up to [`MAX_BAK_FILES`] backups: `.bak`, `.bak.2`, `.bak.3`.
fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
