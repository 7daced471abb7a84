//! Authentication state collaborator
//!
//! Holds the current user and an opaque session token. The one contract the
//! chat stores care about: logout clears all chat state *before* the token
//! is discarded, so no residual conversation data survives a logout. The
//! OAuth flow that produces tokens is out of scope here.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{SnapshotStorage, AUTH_KEY};
use crate::store::ChatStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AuthState {
    user: Option<String>,
    token: Option<String>,
}

/// Persistent authentication state
pub struct AuthStore {
    state: AuthState,
    storage: SnapshotStorage,
}

impl AuthStore {
    /// Restore auth state from its snapshot
    pub fn open(storage: SnapshotStorage) -> Result<Self> {
        let state: AuthState = storage.load(AUTH_KEY)?;
        Ok(Self { state, storage })
    }

    /// The logged-in user, if any
    pub fn current_user(&self) -> Option<&str> {
        self.state.user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.token.is_some()
    }

    /// Record a login
    pub fn set_auth(&mut self, user: &str, token: &str) -> Result<()> {
        self.state.user = Some(user.to_string());
        self.state.token = Some(token.to_string());
        self.persist()?;
        tracing::info!(user, "logged in");
        Ok(())
    }

    /// Log out: clear all chat state, then discard user and token
    ///
    /// The clear-all runs first so a failure there leaves the token in
    /// place rather than leaving chat data behind without a login.
    pub fn logout(&mut self, chat: &mut ChatStore) -> Result<()> {
        chat.clear_all()?;
        self.state = AuthState::default();
        self.persist()?;
        tracing::info!("logged out");
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(AUTH_KEY, &self.state)
    }
}
