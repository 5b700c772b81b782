//! jobscout CLI — the main entry point.
//!
//! Commands:
//! - `agent`  — Interactive chat or single-message mode
//! - `status` — Show configuration and capability status

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "jobscout",
    about = "jobscout — an agent that finds job postings and emails them to you",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the job-search agent
    Agent {
        /// Send a single request instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Show configuration and capability status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Agent { message } => commands::agent::run(message).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
