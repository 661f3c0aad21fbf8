// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Filesystem state store for llmmux

mod document;
pub mod env_file;
mod index;
mod store;

pub use document::{Revision, Versioned};
pub use index::SessionIndex;
pub use store::{StateStore, MAX_UPDATE_ATTEMPTS};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in state store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(
        "{} changed since it was read (expected revision {expected}, found {found})",
        path.display()
    )]
    Conflict {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
