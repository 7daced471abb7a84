//! Message commands: send, show, edit

use colored::Colorize;

use crate::config::Config;
use crate::error::{ChatctlError, Result};
use crate::store::{AppendTarget, MessageRole};
use crate::ui::UiState;

/// Handle the send command
///
/// Target resolution mirrors the composer: an explicit `--session` wins,
/// otherwise the active session, otherwise a new session is created (the
/// send-from-empty-state path).
pub fn send(
    config: &Config,
    content: String,
    session: Option<String>,
    role: &str,
) -> Result<()> {
    let role = MessageRole::parse(role)
        .ok_or_else(|| ChatctlError::Config(format!("Unknown role: {}", role)))?;

    // Composer gate; nothing sets the streaming flag yet, but the send
    // path honors it so a backend can later.
    let ui = UiState::new();
    ui.check_composer()?;

    let mut store = super::open_chat_store(config)?;

    let target = match session {
        Some(id) => AppendTarget::Existing(store.resolve_session_id(&id)?),
        None => match store.active() {
            Some(active) => AppendTarget::Existing(active.to_string()),
            None => AppendTarget::CreateNew,
        },
    };
    let created = target == AppendTarget::CreateNew;

    let session_id = store.append_message(target, role, &content)?;

    if created {
        println!(
            "{}",
            format!("Started session {}", &session_id[..8]).green()
        );
    }
    println!(
        "{}",
        format!("Sent {} message to {}", role.as_str(), &session_id[..8]).green()
    );
    Ok(())
}

/// Handle the show command: print one session's transcript
pub fn show(config: &Config, session: Option<String>) -> Result<()> {
    let store = super::open_chat_store(config)?;

    let session_id = match session {
        Some(id) => store.resolve_session_id(&id)?,
        None => store
            .active()
            .map(str::to_string)
            .ok_or_else(|| ChatctlError::SessionNotFound("no active session".to_string()))?,
    };

    let session = store
        .session(&session_id)
        .ok_or_else(|| ChatctlError::SessionNotFound(session_id.clone()))?;

    println!();
    println!("{} {}", session.title.bold(), format!("({})", &session.id[..8]).cyan());
    println!();

    let messages = store.messages(&session_id);
    if messages.is_empty() {
        println!("{}", "No messages yet.".yellow());
        return Ok(());
    }

    for message in messages {
        let role = match message.role {
            MessageRole::User => "user".blue().bold(),
            MessageRole::Assistant => "assistant".magenta().bold(),
        };
        let stamp = message.timestamp.format("%Y-%m-%d %H:%M");
        println!("[{}] {} {}", stamp, role, format!("({})", &message.id[..8]).dimmed());
        println!("{}", message.content);
        println!();
    }

    Ok(())
}

/// Handle the edit command: in-place content replacement
pub fn edit(config: &Config, session: String, message: String, content: String) -> Result<()> {
    let mut store = super::open_chat_store(config)?;
    let session_id = store.resolve_session_id(&session)?;

    // Accept message id prefixes the same way session ids work
    let message_id = {
        let messages = store.messages(&session_id);
        let mut matches = messages.iter().filter(|m| m.id.starts_with(&message));
        match (matches.next(), matches.next()) {
            (Some(m), None) => m.id.clone(),
            _ => {
                return Err(ChatctlError::MessageNotFound {
                    session_id,
                    message_id: message,
                }
                .into())
            }
        }
    };

    store.update_message(&session_id, &message_id, &content)?;
    println!(
        "{}",
        format!("Updated message {} in {}", &message_id[..8], &session_id[..8]).green()
    );
    Ok(())
}
