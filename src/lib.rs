//! chatctl - Local chat session and message store
//!
//! This library provides the state engine behind the chatctl CLI: a
//! session registry, a per-session message store with an active-session
//! pointer, lexical search over session titles, and full-state snapshot
//! persistence.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `store`: Session registry, message store, and the `ChatStore`
//!   coordinator that owns both and keeps them consistent
//! - `search`: Stateless title search and ranking
//! - `storage`: Versioned JSON snapshot persistence
//! - `auth`: Authentication state and the logout clear-all contract
//! - `ui`: Composer/search UI flags
//! - `config`: Configuration loading and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use chatctl::config::ChatConfig;
//! use chatctl::storage::SnapshotStorage;
//! use chatctl::store::{AppendTarget, ChatStore, MessageRole};
//!
//! fn main() -> anyhow::Result<()> {
//!     let storage = SnapshotStorage::new()?;
//!     let mut store = ChatStore::open(storage, ChatConfig::default())?;
//!
//!     // Send from the empty state: creates, titles, and activates a session
//!     let id = store.append_message(
//!         AppendTarget::CreateNew,
//!         MessageRole::User,
//!         "Plan a weekend trip",
//!     )?;
//!     assert_eq!(store.session(&id).unwrap().title, "Plan a weekend trip");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod search;
pub mod storage;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use auth::AuthStore;
pub use config::Config;
pub use error::{ChatctlError, Result};
pub use search::search;
pub use store::{AppendTarget, ChatSession, ChatStore, Message, MessageRole};
pub use ui::UiState;
