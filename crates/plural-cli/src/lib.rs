//! # plural-cli
//!
//! Command line front end. Opens the configured member store, runs one
//! command against it, and closes the store again (saving the settings file
//! for the flat-file backend).

pub mod cli;
pub mod handlers;
pub mod state;

use std::io::Write;

use plural_common::{AppConfig, AppResult};
use tracing::info;

use crate::cli::{Cli, Command};
use crate::state::AppState;

/// Run one command with configuration from the environment
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::from_env()?;
    info!(env = ?config.app.env, backend = ?config.storage.backend, "configuration loaded");

    let state = AppState::open(config).await?;
    let mut stdout = std::io::stdout();
    let result = dispatch(&state, cli.command, &mut stdout).await;

    // Close the store even when the command failed
    let closed = state.shutdown().await;
    result.and(closed)
}

/// Route a parsed command to its handler
pub async fn dispatch(state: &AppState, command: Command, out: &mut dyn Write) -> AppResult<()> {
    match command {
        Command::Members(cmd) => handlers::members::handle(state, cmd, out).await,
        Command::Import(cmd) => handlers::import::handle(state, cmd, out).await,
        Command::Messages(cmd) => handlers::messages::handle(state, cmd, out).await,
        Command::Diary(cmd) => handlers::diary::handle(state, cmd, out).await,
        Command::Themes(cmd) => handlers::themes::handle(cmd, out).await,
        Command::Export { path } => handlers::export::handle(state, path, out).await,
    }
}
