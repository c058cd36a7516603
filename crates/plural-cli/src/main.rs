//! Plural CLI entry point
//!
//! Run with:
//! ```bash
//! cargo run -p plural-cli -- members list
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use std::process::ExitCode;

use clap::Parser;
use plural_cli::cli::Cli;
use plural_common::try_init_tracing;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let cli = Cli::parse();

    match plural_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.error_code(), error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
