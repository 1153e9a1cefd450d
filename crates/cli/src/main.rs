//! fitrec CLI — the main entry point.
//!
//! Commands:
//! - `init`      — Create the config directory and a default config.toml
//! - `recommend` — Run the agentic loop for one user profile
//! - `doctor`    — Diagnose configuration health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "fitrec",
    about = "fitrec — agentic fitness recommendation engine",
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
    /// Initialize the config directory and write a default config.toml
    Init,

    /// Generate a recommendation for a user profile
    Recommend(commands::recommend::RecommendArgs),

    /// Diagnose configuration health
    Doctor,
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
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Recommend(args) => commands::recommend::run(args).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
