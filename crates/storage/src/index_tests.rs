// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn insert_replaces_existing_name() {
    let mut index = SessionIndex::new();
    assert!(index.insert("demo", SessionId::new("a")).is_none());

    let previous = index.insert("demo", SessionId::new("b"));

    assert_eq!(previous, Some(SessionId::new("a")));
    assert_eq!(index.get("demo"), Some(&SessionId::new("b")));
    assert_eq!(index.len(), 1);
}

#[test]
fn contains_id_looks_at_values() {
    let mut index = SessionIndex::new();
    index.insert("demo", SessionId::new("a"));

    assert!(index.contains_id(&SessionId::new("a")));
    assert!(!index.contains_id(&SessionId::new("demo")));
}

#[test]
fn serializes_as_flat_object() {
    let mut index = SessionIndex::new();
    index.insert("demo(1)", SessionId::new("session_x"));
    index.insert("demo", SessionId::new("session_y"));

    let json = serde_json::to_string(&index).unwrap();
    assert_eq!(json, r#"{"demo":"session_y","demo(1)":"session_x"}"#);

    let parsed: SessionIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, index);
}
