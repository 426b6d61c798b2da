//! Twain CLI binary.
//!
//! This binary provides command-line access to Twain's functionality:
//! - Serve the generation endpoints
//! - Request new question groups from a running service
//! - List, reorder and delete stored groups, or follow them live

use clap::Parser;
use twain::{ObservabilityConfig, TwainConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands};

    // Secrets may live in .env during development
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::new("twain").with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(&observability)?;

    let config = TwainConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => cli::run_server(&config, bind).await?,
        Commands::Generate => cli::generate(&config).await?,
        Commands::Batch { count } => cli::batch(&config, count).await?,
        Commands::List { format } => cli::list(&config, format).await?,
        Commands::Move { id, position } => cli::move_group(&config, &id, position).await?,
        Commands::Delete { id } => cli::delete(&config, &id).await?,
        Commands::Watch => cli::watch(&config).await?,
        Commands::Probe => cli::probe(&config).await?,
    }

    Ok(())
}
