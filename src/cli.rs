//! Command-line interface definition for chatctl
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for session management, sending and editing
//! messages, and authentication.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chatctl - Local chat session and message store
///
/// Manage chat sessions and their messages from the terminal: create and
/// search sessions, send and edit messages, and keep everything in local
/// snapshot storage.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the snapshot data directory
    #[arg(long, env = "CHATCTL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for chatctl
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage chat sessions
    Session {
        /// Session management subcommand
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Send a message
    Send {
        /// Message content
        content: String,

        /// Target session id; defaults to the active session, or creates
        /// a new one when there is no active session
        #[arg(short, long)]
        session: Option<String>,

        /// Author role (user, assistant)
        #[arg(long, default_value = "user")]
        role: String,
    },

    /// Print a session transcript
    Show {
        /// Session id; defaults to the active session
        session: Option<String>,
    },

    /// Edit a message's content in place
    Edit {
        /// Session id the message belongs to
        session: String,

        /// Message id to edit
        message: String,

        /// Replacement content
        content: String,
    },

    /// Manage authentication state
    Auth {
        /// Authentication subcommand
        #[command(subcommand)]
        command: AuthCommand,
    },
}

/// Session management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// Create a new session and make it active
    New,

    /// List all sessions, newest first
    List,

    /// Search session titles
    Search {
        /// Query; tokens match title substrings, prefixes rank higher
        query: String,
    },

    /// Make a session the active one
    Use {
        /// Session id
        id: String,
    },

    /// Rename a session
    Rename {
        /// Session id
        id: String,

        /// New title
        title: String,
    },

    /// Delete a session and its messages
    Delete {
        /// Session id
        id: String,
    },

    /// Delete all sessions and messages
    Clear,
}

/// Authentication subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Store a user and token
    Login {
        /// User name
        user: String,

        /// Opaque session token
        token: String,
    },

    /// Log out and clear all chat state
    Logout,

    /// Show the current user
    Status,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
