//! Command handlers for the CLI
//!
//! Each handler opens the stores, performs one logical operation, and
//! renders the result. The handlers are the only "UI layer" here; all
//! state invariants live in the stores themselves.

pub mod auth;
pub mod chat;
pub mod session;

use crate::config::Config;
use crate::error::Result;
use crate::storage::SnapshotStorage;
use crate::store::ChatStore;

/// Open snapshot storage for the configured data directory
pub(crate) fn open_storage(config: &Config) -> Result<SnapshotStorage> {
    match &config.storage.data_dir {
        Some(dir) => SnapshotStorage::new_with_dir(dir),
        None => SnapshotStorage::new(),
    }
}

/// Open the chat store backed by the configured storage
pub(crate) fn open_chat_store(config: &Config) -> Result<ChatStore> {
    let storage = open_storage(config)?;
    ChatStore::open(storage, config.chat.clone())
}
