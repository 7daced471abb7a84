//! Core data types for the session registry and message store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One chat conversation as listed in the session registry
///
/// The id is opaque and unique; the title is mutable display text.
/// Ownership lives in the registry — everything else refers to a
/// session by id, never by a duplicated struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// User-facing title, mutated by rename and auto-rename
    pub title: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create a session with the current timestamp
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            created_at: Utc::now(),
        }
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Parse a role from its wire/CLI spelling
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(MessageRole::User),
            "assistant" => Some(MessageRole::Assistant),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single message within a session
///
/// Messages are append-only and never reordered; `update` replaces the
/// content in place while id, role, timestamp, and position are preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique within the owning session
    pub id: String,
    /// Author of the message
    pub role: MessageRole,
    /// Message body
    pub content: String,
    /// When the message was appended
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message with a fresh id and the current timestamp
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Convenience constructor for a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Convenience constructor for an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Where an appended message lands
///
/// The original UI used a null session id as the "create a session first"
/// sentinel; the tagged variant makes that branch explicit and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendTarget {
    /// Append to an already-known session
    Existing(String),
    /// Create and activate a fresh session, then append to it
    CreateNew,
}

/// Generate a new globally-unique session id
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a new message id, unique within its session
pub fn new_message_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_id_is_unique() {
        let id1 = new_session_id();
        let id2 = new_session_id();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36); // UUID string length
    }

    #[test]
    fn test_message_constructors_set_role() {
        let user = Message::user("hi");
        assert_eq!(user.role, MessageRole::User);
        let assistant = Message::assistant("hello");
        assert_eq!(assistant.role, MessageRole::Assistant);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let m1 = Message::user("a");
        let m2 = Message::user("a");
        assert_ne!(m1.id, m2.id);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(MessageRole::parse("user"), Some(MessageRole::User));
        assert_eq!(MessageRole::parse("assistant"), Some(MessageRole::Assistant));
        assert_eq!(MessageRole::parse("system"), None);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&MessageRole::User).unwrap();
        assert_eq!(json, "\"user\"");
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_session_serialization_roundtrip() {
        let session = ChatSession::new(new_session_id(), "Weekend plans");
        let json = serde_json::to_string(&session).expect("serialize failed");
        let back: ChatSession = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(back, session);
    }

    #[test]
    fn test_message_serialization_roundtrip() {
        let message = Message::assistant("Sure, here is the plan.");
        let json = serde_json::to_string(&message).expect("serialize failed");
        let back: Message = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(back, message);
    }
}
