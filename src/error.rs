//! Error types for chatctl
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for chatctl operations
///
/// The original store semantics degraded missing-id operations to silent
/// no-ops. This implementation surfaces them as explicit errors instead so
/// call sites (and tests) can tell a successful mutation from a miss.
#[derive(Error, Debug)]
pub enum ChatctlError {
    /// Operation targeted a session id that is not in the registry
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Operation targeted a message id that is not in its session
    #[error("Message not found: session={session_id}, message={message_id}")]
    MessageNotFound {
        /// The session the message was looked up in
        session_id: String,
        /// The message id that could not be found
        message_id: String,
    },

    /// A session with the supplied id already exists in the registry
    #[error("Duplicate session id: {0}")]
    DuplicateSession(String),

    /// Composer is blocked while a response is streaming
    #[error("Cannot send while a response is streaming")]
    StreamingInProgress,

    /// Snapshot storage errors (read/write of persisted state)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication state errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for chatctl operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
