//! Session registry: the ordered list of chat sessions
//!
//! The registry owns every `ChatSession` and keeps them newest-first, the
//! order the sidebar renders them in. It knows nothing about messages;
//! cross-store consistency is the coordinator's job.

use serde::{Deserialize, Serialize};

use crate::error::{ChatctlError, Result};
use crate::store::types::ChatSession;

/// Ordered collection of chat sessions, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRegistry {
    sessions: Vec<ChatSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a session; the new entry is guaranteed to be at index 0
    ///
    /// # Errors
    ///
    /// Returns `ChatctlError::DuplicateSession` if the id is already
    /// registered. The original left this undefined; here the precondition
    /// is checked so a collision cannot corrupt the list silently.
    pub fn add(&mut self, session: ChatSession) -> Result<()> {
        if self.contains(&session.id) {
            return Err(ChatctlError::DuplicateSession(session.id).into());
        }
        self.sessions.insert(0, session);
        Ok(())
    }

    /// Replace the title of the session matching `id`
    ///
    /// # Errors
    ///
    /// Returns `ChatctlError::SessionNotFound` for an unknown id.
    pub fn rename(&mut self, id: &str, title: impl Into<String>) -> Result<()> {
        match self.sessions.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                session.title = title.into();
                Ok(())
            }
            None => Err(ChatctlError::SessionNotFound(id.to_string()).into()),
        }
    }

    /// Remove the session matching `id`
    ///
    /// Does not touch message state — callers wanting the cascade go
    /// through the coordinator's `delete_session`.
    ///
    /// # Errors
    ///
    /// Returns `ChatctlError::SessionNotFound` for an unknown id.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return Err(ChatctlError::SessionNotFound(id.to_string()).into());
        }
        Ok(())
    }

    /// Empty the registry
    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    /// All sessions, newest first
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// Look up a session by id
    pub fn get(&self, id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::new_session_id;

    fn session(title: &str) -> ChatSession {
        ChatSession::new(new_session_id(), title)
    }

    #[test]
    fn test_add_prepends() {
        let mut registry = SessionRegistry::new();
        registry.add(session("first")).expect("add failed");
        registry.add(session("second")).expect("add failed");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.sessions()[0].title, "second");
        assert_eq!(registry.sessions()[1].title, "first");
    }

    #[test]
    fn test_add_duplicate_id_is_rejected() {
        let mut registry = SessionRegistry::new();
        let first = session("first");
        let dup = ChatSession::new(first.id.clone(), "imposter");

        registry.add(first).expect("add failed");
        let err = registry.add(dup).unwrap_err();
        assert!(err
            .downcast_ref::<ChatctlError>()
            .is_some_and(|e| matches!(e, ChatctlError::DuplicateSession(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_rename_replaces_title() {
        let mut registry = SessionRegistry::new();
        let s = session("before");
        let id = s.id.clone();
        registry.add(s).expect("add failed");

        registry.rename(&id, "after").expect("rename failed");
        assert_eq!(registry.get(&id).unwrap().title, "after");
    }

    #[test]
    fn test_rename_unknown_id_errors() {
        let mut registry = SessionRegistry::new();
        let err = registry.rename("missing", "title").unwrap_err();
        assert!(err
            .downcast_ref::<ChatctlError>()
            .is_some_and(|e| matches!(e, ChatctlError::SessionNotFound(_))));
    }

    #[test]
    fn test_delete_removes_entry() {
        let mut registry = SessionRegistry::new();
        let s = session("doomed");
        let id = s.id.clone();
        registry.add(s).expect("add failed");
        registry.add(session("survivor")).expect("add failed");

        registry.delete(&id).expect("delete failed");
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&id).is_none());
        assert!(!registry.contains(&id));
    }

    #[test]
    fn test_delete_unknown_id_errors() {
        let mut registry = SessionRegistry::new();
        assert!(registry.delete("missing").is_err());
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut registry = SessionRegistry::new();
        registry.add(session("a")).expect("add failed");
        registry.add(session("b")).expect("add failed");

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.sessions().len(), 0);
    }

    #[test]
    fn test_registry_serialization_preserves_order() {
        let mut registry = SessionRegistry::new();
        registry.add(session("a")).expect("add failed");
        registry.add(session("b")).expect("add failed");

        let json = serde_json::to_string(&registry).expect("serialize failed");
        let back: SessionRegistry = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(back.sessions()[0].title, "b");
        assert_eq!(back.sessions()[1].title, "a");
    }
}
