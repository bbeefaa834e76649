// crates/cert-portal-api/src/tests/session.rs
// ============================================================================
// Module: Session Store Tests
// Description: Unit tests for session file persistence.
// Purpose: Ensure sessions round-trip and corrupt files fail closed.
// Dependencies: cert-portal-api session helpers, tempfile
// ============================================================================

//! ## Overview
//! Validates session file round-trips, missing-file handling, and rejection
//! of corrupt or oversized session files.

use std::fs;
use std::path::PathBuf;

use cert_portal_core::Role;
use tempfile::TempDir;

use crate::client::ApiError;
use crate::session::SessionStore;
use crate::session::StoredSession;
use crate::tests::support::user_value;

fn session_path(dir: &TempDir) -> PathBuf {
    dir.path().join("cert-portal-session.toml")
}

fn sample_session() -> StoredSession {
    StoredSession {
        cookie_name: "portal_session".to_string(),
        cookie_value: "abc123".to_string(),
        user: serde_json::from_value(user_value("asesi")).expect("user fixture"),
    }
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().expect("tempdir");
    let store = SessionStore::new(session_path(&dir));
    store.save(&sample_session()).expect("save session");
    let loaded = store.load().expect("load session").expect("session present");
    assert_eq!(loaded.cookie_name, "portal_session");
    assert_eq!(loaded.cookie_value, "abc123");
    assert_eq!(loaded.user.username, "budi");
    assert_eq!(loaded.user.role, Role::Asesi);
}

#[test]
fn load_missing_file_returns_none() {
    let dir = TempDir::new().expect("tempdir");
    let store = SessionStore::new(session_path(&dir));
    assert!(store.load().expect("load session").is_none());
}

#[test]
fn clear_removes_session_and_is_idempotent() {
    let dir = TempDir::new().expect("tempdir");
    let store = SessionStore::new(session_path(&dir));
    store.save(&sample_session()).expect("save session");
    store.clear().expect("clear session");
    assert!(store.load().expect("load session").is_none());
    store.clear().expect("clear absent session");
}

#[test]
fn save_replaces_previous_session() {
    let dir = TempDir::new().expect("tempdir");
    let store = SessionStore::new(session_path(&dir));
    store.save(&sample_session()).expect("save session");
    let mut replacement = sample_session();
    replacement.cookie_value = "def456".to_string();
    store.save(&replacement).expect("replace session");
    let loaded = store.load().expect("load session").expect("session present");
    assert_eq!(loaded.cookie_value, "def456");
}

#[test]
fn load_rejects_non_utf8_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = session_path(&dir);
    fs::write(&path, [0xff, 0xfe, 0xfd]).expect("write bytes");
    let err = SessionStore::new(path).load().expect_err("expected utf-8 error");
    assert!(matches!(err, ApiError::Session(_)), "unexpected error: {err:?}");
    assert!(err.to_string().contains("utf-8"));
}

#[test]
fn load_rejects_malformed_toml() {
    let dir = TempDir::new().expect("tempdir");
    let path = session_path(&dir);
    fs::write(&path, "cookie_name = [unclosed").expect("write toml");
    let err = SessionStore::new(path).load().expect_err("expected parse error");
    assert!(err.to_string().contains("session file parse failed"));
}

#[test]
fn load_rejects_oversized_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = session_path(&dir);
    fs::write(&path, vec![b'#'; 64 * 1024 + 1]).expect("write oversized file");
    let err = SessionStore::new(path).load().expect_err("expected size limit error");
    assert!(err.to_string().contains("exceeds size limit"));
}

#[test]
fn debug_output_redacts_cookie_value() {
    let session = sample_session();
    let debug = format!("{session:?}");
    assert!(debug.contains("<redacted>"), "missing redaction: {debug}");
    assert!(!debug.contains("abc123"), "cookie value leaked: {debug}");
}

#[test]
fn saved_file_is_plain_toml() {
    let dir = TempDir::new().expect("tempdir");
    let store = SessionStore::new(session_path(&dir));
    store.save(&sample_session()).expect("save session");
    let text = fs::read_to_string(store.path()).expect("read session file");
    assert!(text.contains("cookie_name = \"portal_session\""), "unexpected file: {text}");
    assert!(text.contains("[user]"), "user table missing: {text}");
}
