//! Message store: per-session message sequences and the active pointer
//!
//! Holds the session-id → messages mapping and tracks which session the
//! composer currently targets. Session identity lives in the registry;
//! this store only keys buckets by id. Missing-key reads degrade to empty
//! results, mutations on unknown ids are explicit errors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ChatctlError, Result};
use crate::store::types::{new_session_id, AppendTarget, Message};

/// Result of an append: which session received the message and whether its
/// bucket was empty beforehand (the auto-rename trigger).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// The session the message landed in, now the active session
    pub session_id: String,
    /// True when the bucket held no messages before this append
    pub was_empty: bool,
}

/// Per-session message sequences plus the active-session pointer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageStore {
    active: Option<String>,
    buckets: HashMap<String, Vec<Message>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh session id, give it an empty bucket, and activate it
    ///
    /// The returned id is immediately valid for `append` and `set_active`.
    /// Registry registration happens in the coordinator.
    pub fn create_session(&mut self) -> String {
        let id = new_session_id();
        self.buckets.insert(id.clone(), Vec::new());
        self.active = Some(id.clone());
        id
    }

    /// Point the composer at `id`
    ///
    /// Unknown ids get an empty bucket; switching to a known id preserves
    /// its history (idempotent).
    pub fn set_active(&mut self, id: &str) {
        self.buckets.entry(id.to_string()).or_default();
        self.active = Some(id.to_string());
    }

    /// Append a message to the target session and activate it
    ///
    /// `AppendTarget::CreateNew` is the "send from empty state" path: a
    /// fresh session is created first and used as the target.
    pub fn append(&mut self, target: AppendTarget, message: Message) -> AppendOutcome {
        let session_id = match target {
            AppendTarget::Existing(id) => id,
            AppendTarget::CreateNew => self.create_session(),
        };

        let bucket = self.buckets.entry(session_id.clone()).or_default();
        let was_empty = bucket.is_empty();
        bucket.push(message);
        self.active = Some(session_id.clone());

        AppendOutcome {
            session_id,
            was_empty,
        }
    }

    /// Replace the content of one message in place
    ///
    /// Id, role, timestamp, and position are all preserved — this is the
    /// in-place edit of a user message.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound`/`MessageNotFound` for unknown ids.
    pub fn update_message(
        &mut self,
        session_id: &str,
        message_id: &str,
        new_content: impl Into<String>,
    ) -> Result<()> {
        let bucket = self
            .buckets
            .get_mut(session_id)
            .ok_or_else(|| ChatctlError::SessionNotFound(session_id.to_string()))?;

        let message = bucket
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or_else(|| ChatctlError::MessageNotFound {
                session_id: session_id.to_string(),
                message_id: message_id.to_string(),
            })?;

        message.content = new_content.into();
        Ok(())
    }

    /// Drop a session's bucket entirely
    ///
    /// Clears the active pointer when it pointed at the removed session.
    /// Removing an unknown id is a no-op (nothing to drop).
    pub fn clear_session(&mut self, session_id: &str) {
        self.buckets.remove(session_id);
        if self.active.as_deref() == Some(session_id) {
            self.active = None;
        }
    }

    /// Empty the mapping and clear the active pointer
    pub fn clear_all(&mut self) {
        self.buckets.clear();
        self.active = None;
    }

    /// The currently active session id, if any
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Messages of one session, oldest first; unknown ids yield an empty slice
    pub fn messages(&self, session_id: &str) -> &[Message] {
        self.buckets
            .get(session_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of messages in one session
    pub fn message_count(&self, session_id: &str) -> usize {
        self.messages(session_id).len()
    }

    /// Whether a bucket exists for `session_id`
    pub fn has_session(&self, session_id: &str) -> bool {
        self.buckets.contains_key(session_id)
    }

    /// Ids of all buckets, in no particular order
    pub fn session_ids(&self) -> Vec<String> {
        self.buckets.keys().cloned().collect()
    }

    /// Drop buckets whose ids are not accepted by `keep`
    ///
    /// Used at load time to reconcile buckets orphaned by a registry delete
    /// that never cascaded. Returns the ids that were dropped.
    pub fn retain_sessions<F>(&mut self, keep: F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        let dropped: Vec<String> = self
            .buckets
            .keys()
            .filter(|id| !keep(id))
            .cloned()
            .collect();
        for id in &dropped {
            self.clear_session(id);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::MessageRole;

    #[test]
    fn test_create_session_activates_empty_bucket() {
        let mut store = MessageStore::new();
        let id = store.create_session();

        assert_eq!(store.active(), Some(id.as_str()));
        assert!(store.has_session(&id));
        assert!(store.messages(&id).is_empty());
    }

    #[test]
    fn test_create_session_ids_are_fresh() {
        let mut store = MessageStore::new();
        let id1 = store.create_session();
        let id2 = store.create_session();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_set_active_initializes_unknown_bucket() {
        let mut store = MessageStore::new();
        store.set_active("fresh-id");

        assert_eq!(store.active(), Some("fresh-id"));
        assert!(store.has_session("fresh-id"));
    }

    #[test]
    fn test_set_active_preserves_history() {
        let mut store = MessageStore::new();
        let id = store.create_session();
        store.append(AppendTarget::Existing(id.clone()), Message::user("hi"));

        store.set_active("other");
        store.set_active(&id);
        assert_eq!(store.messages(&id).len(), 1);
    }

    #[test]
    fn test_append_to_existing_session() {
        let mut store = MessageStore::new();
        let id = store.create_session();

        let outcome = store.append(AppendTarget::Existing(id.clone()), Message::user("hello"));
        assert_eq!(outcome.session_id, id);
        assert!(outcome.was_empty);

        let outcome = store.append(AppendTarget::Existing(id.clone()), Message::assistant("hi"));
        assert!(!outcome.was_empty);
        assert_eq!(store.messages(&id).len(), 2);
    }

    #[test]
    fn test_append_create_new_creates_and_activates() {
        let mut store = MessageStore::new();
        let outcome = store.append(AppendTarget::CreateNew, Message::user("first"));

        assert!(outcome.was_empty);
        assert_eq!(store.active(), Some(outcome.session_id.as_str()));
        assert_eq!(store.messages(&outcome.session_id).len(), 1);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = MessageStore::new();
        let id = store.create_session();
        for i in 0..5 {
            store.append(
                AppendTarget::Existing(id.clone()),
                Message::user(format!("msg {}", i)),
            );
        }

        let contents: Vec<&str> = store
            .messages(&id)
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["msg 0", "msg 1", "msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn test_update_message_preserves_identity_and_position() {
        let mut store = MessageStore::new();
        let id = store.create_session();
        store.append(AppendTarget::Existing(id.clone()), Message::user("first"));
        let target = Message::user("second");
        let message_id = target.id.clone();
        let timestamp = target.timestamp;
        store.append(AppendTarget::Existing(id.clone()), target);
        store.append(AppendTarget::Existing(id.clone()), Message::user("third"));

        store
            .update_message(&id, &message_id, "second, edited")
            .expect("update failed");

        let messages = store.messages(&id);
        assert_eq!(messages[1].id, message_id);
        assert_eq!(messages[1].content, "second, edited");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].timestamp, timestamp);
        assert_eq!(messages[0].content, "first");
        assert_eq!(messages[2].content, "third");
    }

    #[test]
    fn test_update_message_unknown_session_errors() {
        let mut store = MessageStore::new();
        let err = store.update_message("missing", "m1", "x").unwrap_err();
        assert!(err
            .downcast_ref::<ChatctlError>()
            .is_some_and(|e| matches!(e, ChatctlError::SessionNotFound(_))));
    }

    #[test]
    fn test_update_message_unknown_message_errors() {
        let mut store = MessageStore::new();
        let id = store.create_session();
        let err = store.update_message(&id, "missing", "x").unwrap_err();
        assert!(err
            .downcast_ref::<ChatctlError>()
            .is_some_and(|e| matches!(e, ChatctlError::MessageNotFound { .. })));
    }

    #[test]
    fn test_clear_session_drops_bucket_and_active_pointer() {
        let mut store = MessageStore::new();
        let id = store.create_session();
        store.append(AppendTarget::Existing(id.clone()), Message::user("hi"));

        store.clear_session(&id);
        assert!(!store.has_session(&id));
        assert_eq!(store.active(), None);
        assert!(store.messages(&id).is_empty());
    }

    #[test]
    fn test_clear_session_keeps_unrelated_active_pointer() {
        let mut store = MessageStore::new();
        let first = store.create_session();
        let second = store.create_session();

        store.clear_session(&first);
        assert_eq!(store.active(), Some(second.as_str()));
    }

    #[test]
    fn test_clear_all_empties_everything() {
        let mut store = MessageStore::new();
        let id = store.create_session();
        store.append(AppendTarget::Existing(id), Message::user("hi"));
        store.create_session();

        store.clear_all();
        assert_eq!(store.active(), None);
        assert!(store.session_ids().is_empty());
    }

    #[test]
    fn test_messages_unknown_id_is_empty() {
        let store = MessageStore::new();
        assert!(store.messages("nope").is_empty());
        assert_eq!(store.message_count("nope"), 0);
    }

    #[test]
    fn test_retain_sessions_drops_orphans() {
        let mut store = MessageStore::new();
        let keep_id = store.create_session();
        let orphan_id = store.create_session();
        store.append(
            AppendTarget::Existing(orphan_id.clone()),
            Message::user("stranded"),
        );

        let dropped = store.retain_sessions(|id| id == keep_id);
        assert_eq!(dropped, vec![orphan_id.clone()]);
        assert!(store.has_session(&keep_id));
        assert!(!store.has_session(&orphan_id));
        // Orphan was active; pointer must not dangle
        assert_eq!(store.active(), None);
    }

    #[test]
    fn test_store_serialization_roundtrip() {
        let mut store = MessageStore::new();
        let id = store.create_session();
        store.append(AppendTarget::Existing(id.clone()), Message::user("hello"));

        let json = serde_json::to_string(&store).expect("serialize failed");
        let back: MessageStore = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(back.active(), Some(id.as_str()));
        assert_eq!(back.messages(&id).len(), 1);
        assert_eq!(back.messages(&id)[0].content, "hello");
    }
}
