//! chatctl - Local chat session and message store CLI
//!
//! Main entry point: initializes tracing, loads configuration, and
//! dispatches to the command handlers.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatctl::cli::{Cli, Commands};
use chatctl::commands;
use chatctl::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    match cli.command {
        Commands::Session { command } => {
            tracing::debug!("running session command");
            commands::session::handle_session(command, &config)?;
        }
        Commands::Send {
            content,
            session,
            role,
        } => {
            tracing::debug!("running send command");
            commands::chat::send(&config, content, session, &role)?;
        }
        Commands::Show { session } => {
            tracing::debug!("running show command");
            commands::chat::show(&config, session)?;
        }
        Commands::Edit {
            session,
            message,
            content,
        } => {
            tracing::debug!("running edit command");
            commands::chat::edit(&config, session, message, content)?;
        }
        Commands::Auth { command } => {
            tracing::debug!("running auth command");
            commands::auth::handle_auth(command, &config)?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "chatctl=debug" } else { "chatctl=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
