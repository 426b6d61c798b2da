//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Twain - generate and curate conversation question groups
#[derive(Parser, Debug)]
#[command(name = "twain")]
#[command(about = "Generate and curate conversation question groups", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Extra configuration file, layered over the standard locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind, overriding `server.bind`
        #[arg(long)]
        bind: Option<String>,
    },

    /// Ask the service for one question group
    Generate,

    /// Ask the service for several question groups
    Batch {
        /// Number of groups to request
        #[arg(long, default_value = "10")]
        count: usize,
    },

    /// List stored question groups in display order
    List {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Move a question group to a new position
    Move {
        /// Id of the group to move
        id: String,

        /// Zero-based target position
        position: usize,
    },

    /// Delete a question group
    Delete {
        /// Id of the group to delete
        id: String,
    },

    /// Follow the live view until interrupted
    Watch,

    /// Check that the configured credential can write to the store
    Probe,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
