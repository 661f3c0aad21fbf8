// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Window addressing inside a live session.

crate::define_id! {
    /// Host-assigned window identifier (tmux `#{window_id}`, e.g. `@3`).
    ///
    /// Display names may repeat inside a session; this id never does, so
    /// command injection always targets the window that was just created.
    pub struct WindowId;
}
