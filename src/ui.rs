//! UI state flags shared between the composer and the search surface
//!
//! `is_streaming` is a reserved hook for a future backend: nothing in the
//! core sets it, but the composer refuses to send while it is up. The
//! search-open flag backs the search modal toggle.

use crate::error::{ChatctlError, Result};

/// Transient UI flags; not persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    is_streaming: bool,
    is_search_open: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_streaming(&self) -> bool {
        self.is_streaming
    }

    pub fn set_streaming(&mut self, streaming: bool) {
        self.is_streaming = streaming;
    }

    pub fn is_search_open(&self) -> bool {
        self.is_search_open
    }

    /// Flip the search modal; returns the new state
    pub fn toggle_search(&mut self) -> bool {
        self.is_search_open = !self.is_search_open;
        self.is_search_open
    }

    /// Check whether the composer may send right now
    ///
    /// # Errors
    ///
    /// Returns `StreamingInProgress` while a response is streaming.
    pub fn check_composer(&self) -> Result<()> {
        if self.is_streaming {
            return Err(ChatctlError::StreamingInProgress.into());
        }
        Ok(())
    }
}
