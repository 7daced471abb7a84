//! Session management commands

use colored::Colorize;
use prettytable::{format, Table};

use crate::cli::SessionCommand;
use crate::config::Config;
use crate::error::Result;
use crate::search;
use crate::store::{ChatSession, ChatStore};

/// Handle session subcommands
pub fn handle_session(command: SessionCommand, config: &Config) -> Result<()> {
    let mut store = super::open_chat_store(config)?;

    match command {
        SessionCommand::New => {
            let id = store.new_session()?;
            println!("{}", format!("Created session {}", id).green());
        }
        SessionCommand::List => {
            print_session_table(&store, store.sessions());
        }
        SessionCommand::Search { query } => {
            let results = search::search(&query, store.sessions());
            if results.is_empty() {
                println!("{}", format!("No sessions match '{}'.", query).yellow());
                return Ok(());
            }
            print_session_table(&store, &results);
        }
        SessionCommand::Use { id } => {
            let id = store.resolve_session_id(&id)?;
            store.set_active(&id)?;
            println!("{}", format!("Active session is now {}", id).green());
        }
        SessionCommand::Rename { id, title } => {
            let id = store.resolve_session_id(&id)?;
            store.rename_session(&id, &title)?;
            println!("{}", format!("Renamed session {}", id).green());
        }
        SessionCommand::Delete { id } => {
            let id = store.resolve_session_id(&id)?;
            store.delete_session(&id)?;
            println!("{}", format!("Deleted session {}", id).green());
        }
        SessionCommand::Clear => {
            store.clear_all()?;
            println!("{}", "Deleted all sessions.".green());
        }
    }

    Ok(())
}

/// Render sessions as a table, newest first
fn print_session_table(store: &ChatStore, sessions: &[ChatSession]) {
    if sessions.is_empty() {
        println!("{}", "No sessions yet.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Title".bold(),
        "Messages".bold(),
        "Created".bold(),
        "".bold()
    ]);

    let active = store.active();
    for session in sessions {
        let id_short = &session.id[..8];
        let title = if session.title.chars().count() > 40 {
            let truncated: String = session.title.chars().take(37).collect();
            format!("{}...", truncated)
        } else {
            session.title.clone()
        };
        let created = session.created_at.format("%Y-%m-%d %H:%M").to_string();
        let marker = if active == Some(session.id.as_str()) {
            "active"
        } else {
            ""
        };

        table.add_row(prettytable::row![
            id_short.cyan(),
            title,
            store.message_count(&session.id),
            created,
            marker.green()
        ]);
    }

    table.printstd();
    println!();
    println!(
        "Use {} to make a session active.",
        "chatctl session use <ID>".cyan()
    );
}
