//! corechat CLI — the main entry point.
//!
//! Commands:
//! - `agent`    — Chat with the hosted agent runtime (default)
//! - `chat`     — Chat directly with a model endpoint
//! - `models`   — List configured models
//! - `session`  — Show the session id for the current caller

use std::path::PathBuf;
use clap::{Parser, Subcommand};

mod commands;
mod repl;

#[derive(Parser)]
#[command(
    name = "corechat",
    about = "corechat — chat with a hosted agent runtime, with conversation memory",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (default: ~/.corechat/config.toml)
    #[arg(short, long, global = true, env = "CORECHAT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the hosted agent runtime
    Agent {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Model to request from the runtime
        #[arg(long)]
        model: Option<String>,
    },

    /// Chat directly with an OpenAI-compatible model endpoint
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List the configured models
    Models,

    /// Show the session id resolved for the current caller
    Session,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with streamed replies
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Agent { message: None, model: None }) {
        Commands::Agent { message, model } => commands::agent::run(&config, message, model).await?,
        Commands::Chat { message } => commands::chat::run(&config, message).await?,
        Commands::Models => commands::models::run(&config),
        Commands::Session => commands::session::run(&config).await?,
    }

    Ok(())
}
