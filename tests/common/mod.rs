//! Common test utilities for integration tests.
//!
//! Fixtures for backend JSON records, SSE bodies, and session stores.
//!
//! # Example
//!
//! ```ignore
//! mod common;
//! use common::{sse_body, conversation_json};
//!
//! let body = sse_body(&[r#"{"type":"done"}"#, "[DONE]"]);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use khoj::auth::{Session, SessionStore};
use serde_json::{json, Value};
use tempfile::TempDir;
use uuid::Uuid;

/// Fixed user id used across tests.
pub const USER_ID: &str = "6f1c1a4e-3f0b-4d8e-9a57-0f6f3c2a1b11";

/// Fixed conversation id used across tests.
pub const CONVERSATION_ID: &str = "0b7d6c2e-8d5f-4f3e-a0b1-2c3d4e5f6a7b";

pub fn user_id() -> Uuid {
    Uuid::parse_str(USER_ID).unwrap()
}

pub fn conversation_id() -> Uuid {
    Uuid::parse_str(CONVERSATION_ID).unwrap()
}

/// Format payloads as an SSE body, one `data:` frame each.
pub fn sse_body(payloads: &[&str]) -> String {
    payloads
        .iter()
        .map(|payload| format!("data: {}\n\n", payload))
        .collect()
}

/// A message record as the backend serializes it.
pub fn message_json(role: &str, content: &str) -> Value {
    json!({
        "id": Uuid::new_v4().to_string(),
        "role": role,
        "content": content,
        "sentAt": "2024-05-01T10:15:30.123456",
    })
}

/// A conversation record as the backend serializes it.
pub fn conversation_json(title: &str, messages: Vec<Value>) -> Value {
    json!({
        "id": CONVERSATION_ID,
        "title": title,
        "createdAt": "2024-05-01T10:15:00",
        "messages": messages,
    })
}

/// A session store in a fresh temp directory.
///
/// The directory is removed when the returned `TempDir` drops.
pub fn temp_store() -> (TempDir, SessionStore) {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::with_path(dir.path().join("session.json"));
    (dir, store)
}

/// A logged-in session for the fixed test user.
pub fn test_session() -> Session {
    Session::new(user_id(), "ada", Some("test-token".to_string()))
}
