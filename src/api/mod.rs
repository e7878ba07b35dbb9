//! Axum HTTP handlers.

pub mod chat;
pub mod transcribe;
pub mod users;

/// Session used when the client does not supply a `session_id`.
pub const DEFAULT_SESSION: &str = "default";
