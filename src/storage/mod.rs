//! Snapshot persistence for store state
//!
//! Each store persists as an independent full-state JSON snapshot under a
//! fixed key in the user's data directory, written on every mutation and
//! restored verbatim at startup. Snapshots carry an explicit schema version;
//! an unreadable or version-mismatched snapshot resets to the empty state
//! with a warning rather than failing startup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ChatctlError, Result};

/// Current snapshot schema version
///
/// Bump on any incompatible change to the persisted state shape.
pub const SCHEMA_VERSION: u32 = 1;

/// Fixed key for the session registry snapshot
pub const SESSIONS_KEY: &str = "sessions";
/// Fixed key for the message store snapshot
pub const MESSAGES_KEY: &str = "messages";
/// Fixed key for the auth state snapshot
pub const AUTH_KEY: &str = "auth";

#[derive(Debug, Deserialize)]
struct Snapshot<T> {
    schema_version: u32,
    state: T,
}

#[derive(Debug, Serialize)]
struct SnapshotRef<'a, T> {
    schema_version: u32,
    state: &'a T,
}

/// JSON snapshot storage rooted at a data directory
#[derive(Debug, Clone)]
pub struct SnapshotStorage {
    data_dir: PathBuf,
}

impl SnapshotStorage {
    /// Create a storage instance rooted at the platform data directory
    ///
    /// `CHATCTL_DATA_DIR` overrides the location, which makes it easy to
    /// point the binary at a scratch directory in tests without touching
    /// the user's real data.
    pub fn new() -> Result<Self> {
        if let Ok(override_dir) = std::env::var("CHATCTL_DATA_DIR") {
            return Self::new_with_dir(override_dir);
        }

        let proj_dirs = ProjectDirs::from("com", "chatctl", "chatctl")
            .ok_or_else(|| ChatctlError::Storage("Could not determine data directory".into()))?;

        Self::new_with_dir(proj_dirs.data_dir())
    }

    /// Create a storage instance rooted at an explicit directory
    pub fn new_with_dir(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;
        Ok(Self { data_dir })
    }

    /// The directory snapshots live in
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Load the state stored under `key`
    ///
    /// A missing file yields the default (first run). A snapshot that fails
    /// to decode or carries a different schema version also yields the
    /// default, after a warning — reset, not reject. Only real IO failures
    /// propagate as errors.
    pub fn load<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(T::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snapshot {:?}", path))?;

        match serde_json::from_str::<Snapshot<T>>(&raw) {
            Ok(snapshot) if snapshot.schema_version == SCHEMA_VERSION => Ok(snapshot.state),
            Ok(snapshot) => {
                tracing::warn!(
                    key,
                    found = snapshot.schema_version,
                    expected = SCHEMA_VERSION,
                    "snapshot schema version mismatch, resetting to empty state"
                );
                Ok(T::default())
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "snapshot is unreadable, resetting to empty state");
                Ok(T::default())
            }
        }
    }

    /// Write the full state under `key`, replacing any previous snapshot
    pub fn save<T>(&self, key: &str, state: &T) -> Result<()>
    where
        T: Serialize,
    {
        let snapshot = SnapshotRef {
            schema_version: SCHEMA_VERSION,
            state,
        };
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ChatctlError::Storage(format!("Serialization failed: {}", e)))?;

        let path = self.path_for(key);
        fs::write(&path, json).with_context(|| format!("Failed to write snapshot {:?}", path))?;
        Ok(())
    }

    /// Remove the snapshot stored under `key`, if present
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove snapshot {:?}", path))?;
        }
        Ok(())
    }
}
