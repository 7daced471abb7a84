//! Chat state: session registry, message store, and the coordinator
//!
//! The registry and message store are independent structs with their own
//! invariants; `ChatStore` is the composition root that owns both plus the
//! snapshot storage, and is the single consistency boundary for every
//! cross-store operation (session creation, auto-rename, cascading delete,
//! the logout clear-all). All mutations go through `&mut self` on one owner,
//! so partial updates can never interleave; a multi-threaded embedding wraps
//! the whole `ChatStore` in one mutex to keep that guarantee.

pub mod messages;
pub mod registry;
pub mod types;

pub use messages::{AppendOutcome, MessageStore};
pub use registry::SessionRegistry;
pub use types::{new_message_id, new_session_id, AppendTarget, ChatSession, Message, MessageRole};

use crate::config::ChatConfig;
use crate::error::{ChatctlError, Result};
use crate::storage::{SnapshotStorage, MESSAGES_KEY, SESSIONS_KEY};

/// Coordinator owning the session registry and the message store
///
/// Every mutating operation persists a full snapshot of both stores before
/// returning, so on-disk state always reflects the last completed mutation.
pub struct ChatStore {
    registry: SessionRegistry,
    messages: MessageStore,
    storage: SnapshotStorage,
    config: ChatConfig,
}

impl ChatStore {
    /// Restore both stores from their snapshots
    ///
    /// Message buckets whose session id is no longer in the registry are a
    /// latent inconsistency a pre-coordinator build could leave behind;
    /// they are dropped here with a warning. An active pointer referencing
    /// a deleted session is cleared the same way.
    pub fn open(storage: SnapshotStorage, config: ChatConfig) -> Result<Self> {
        let registry: SessionRegistry = storage.load(SESSIONS_KEY)?;
        let mut messages: MessageStore = storage.load(MESSAGES_KEY)?;

        let dropped = messages.retain_sessions(|id| registry.contains(id));
        if !dropped.is_empty() {
            tracing::warn!(
                count = dropped.len(),
                "dropped message buckets with no registry entry"
            );
        }
        if let Some(active) = messages.active().map(str::to_string) {
            if !registry.contains(&active) {
                tracing::warn!(session_id = %active, "active session no longer exists");
                messages.clear_session(&active);
            }
        }

        Ok(Self {
            registry,
            messages,
            storage,
            config,
        })
    }

    /// Create a session titled with the configured default and activate it
    ///
    /// The returned id is immediately valid for `append_message` and
    /// `set_active`.
    pub fn new_session(&mut self) -> Result<String> {
        let id = self.create_session_entry()?;
        self.persist()?;
        tracing::debug!(session_id = %id, "created session");
        Ok(id)
    }

    /// Registry + message store creation without persisting; used by both
    /// the explicit new-session action and the CreateNew append path so a
    /// send from the empty state is one logical transaction.
    fn create_session_entry(&mut self) -> Result<String> {
        let id = self.messages.create_session();
        self.registry.add(ChatSession::new(
            id.clone(),
            self.config.default_title.clone(),
        ))?;
        Ok(id)
    }

    /// Append a message and activate its session
    ///
    /// `AppendTarget::CreateNew` creates a session first — the "send from
    /// empty state" path. A user message landing in a previously-empty
    /// session renames it to the leading characters of the content
    /// (auto-rename); assistant messages and non-empty sessions never
    /// rename. Returns the id of the session the message landed in.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` when an explicit target id is not in the
    /// registry.
    pub fn append_message(
        &mut self,
        target: AppendTarget,
        role: MessageRole,
        content: &str,
    ) -> Result<String> {
        let session_id = match target {
            AppendTarget::Existing(id) => {
                if !self.registry.contains(&id) {
                    return Err(ChatctlError::SessionNotFound(id).into());
                }
                id
            }
            AppendTarget::CreateNew => self.create_session_entry()?,
        };

        let outcome = self.messages.append(
            AppendTarget::Existing(session_id),
            Message::new(role, content),
        );

        if role == MessageRole::User && outcome.was_empty {
            let title = derive_title(content, self.config.title_max_chars);
            self.registry.rename(&outcome.session_id, title)?;
        }

        self.persist()?;
        tracing::debug!(session_id = %outcome.session_id, role = role.as_str(), "appended message");
        Ok(outcome.session_id)
    }

    /// Replace the content of one message in place
    pub fn update_message(
        &mut self,
        session_id: &str,
        message_id: &str,
        new_content: &str,
    ) -> Result<()> {
        self.messages
            .update_message(session_id, message_id, new_content)?;
        self.persist()
    }

    /// Point the composer at an existing session
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for ids the registry does not know —
    /// the active pointer must always reference a live session.
    pub fn set_active(&mut self, session_id: &str) -> Result<()> {
        if !self.registry.contains(session_id) {
            return Err(ChatctlError::SessionNotFound(session_id.to_string()).into());
        }
        self.messages.set_active(session_id);
        self.persist()
    }

    /// Rename a session
    pub fn rename_session(&mut self, session_id: &str, title: &str) -> Result<()> {
        self.registry.rename(session_id, title)?;
        self.persist()
    }

    /// Delete a session: registry entry and message bucket go together
    ///
    /// The original split this across two stores and relied on call sites
    /// to invoke both halves; here the cascade is atomic within the
    /// coordinator, so an orphaned bucket cannot be created.
    pub fn delete_session(&mut self, session_id: &str) -> Result<()> {
        self.registry.delete(session_id)?;
        self.messages.clear_session(session_id);
        self.persist()?;
        tracing::debug!(session_id, "deleted session");
        Ok(())
    }

    /// Empty both stores and the active pointer — the logout contract
    pub fn clear_all(&mut self) -> Result<()> {
        self.registry.clear();
        self.messages.clear_all();
        self.persist()?;
        tracing::debug!("cleared all chat state");
        Ok(())
    }

    /// All sessions, newest first
    pub fn sessions(&self) -> &[ChatSession] {
        self.registry.sessions()
    }

    /// Look up one session
    pub fn session(&self, session_id: &str) -> Option<&ChatSession> {
        self.registry.get(session_id)
    }

    /// Messages of one session, oldest first; unknown ids yield empty
    pub fn messages(&self, session_id: &str) -> &[Message] {
        self.messages.messages(session_id)
    }

    /// Number of messages in one session
    pub fn message_count(&self, session_id: &str) -> usize {
        self.messages.message_count(session_id)
    }

    /// The active session id, if any
    pub fn active(&self) -> Option<&str> {
        self.messages.active()
    }

    /// Resolve a full id or unique id prefix to a registered session id
    ///
    /// Lets the CLI accept the 8-character short ids it prints.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` when nothing matches or the prefix is
    /// ambiguous.
    pub fn resolve_session_id(&self, id_or_prefix: &str) -> Result<String> {
        if self.registry.contains(id_or_prefix) {
            return Ok(id_or_prefix.to_string());
        }
        let mut matches = self
            .registry
            .sessions()
            .iter()
            .filter(|s| s.id.starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(session), None) => Ok(session.id.clone()),
            _ => Err(ChatctlError::SessionNotFound(id_or_prefix.to_string()).into()),
        }
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(SESSIONS_KEY, &self.registry)?;
        self.storage.save(MESSAGES_KEY, &self.messages)?;
        Ok(())
    }
}

/// Derive a session title from the first user message
fn derive_title(content: &str, max_chars: usize) -> String {
    content.chars().take(max_chars).collect()
}
