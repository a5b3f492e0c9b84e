//! Sigil CLI - OAuth 1.0a signed API client.
//!
//! Provides commands for:
//! - `sign`: Print the `Authorization` header for a request
//! - `request`: Send a signed request and print the decoded response

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RequestArgs, SignArgs};
use output::Output;

/// Sigil - OAuth 1.0a signed API client.
#[derive(Parser)]
#[command(name = "sigil", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover sigil.toml).
    #[arg(short, long, global = true, env = "SIGIL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the OAuth Authorization header for a request.
    Sign(SignArgs),
    /// Send a signed API request.
    Request(RequestArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Sign(args) => args.execute(config),
        Commands::Request(args) => args.execute(config),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {}", output::error_chain(&err)));
        std::process::exit(1);
    }
}
