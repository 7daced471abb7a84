//! Authentication commands

use colored::Colorize;

use crate::auth::AuthStore;
use crate::cli::AuthCommand;
use crate::config::Config;
use crate::error::Result;

/// Handle auth subcommands
pub fn handle_auth(command: AuthCommand, config: &Config) -> Result<()> {
    let storage = super::open_storage(config)?;
    let mut auth = AuthStore::open(storage)?;

    match command {
        AuthCommand::Login { user, token } => {
            auth.set_auth(&user, &token)?;
            println!("{}", format!("Logged in as {}", user).green());
        }
        AuthCommand::Logout => {
            let mut chat = super::open_chat_store(config)?;
            auth.logout(&mut chat)?;
            println!("{}", "Logged out. All chat data cleared.".green());
        }
        AuthCommand::Status => match auth.current_user() {
            Some(user) => println!("Logged in as {}", user.green()),
            None => println!("{}", "Not logged in.".yellow()),
        },
    }

    Ok(())
}
