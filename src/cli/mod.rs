//! Command-line interface for Courtside.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Courtside - fantasy basketball team builder
#[derive(Parser)]
#[command(name = "courtside")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default)
    #[command(alias = "-d", alias = "--daemon")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Load catalog players from a JSON file
    #[command(alias = "import")]
    ImportPlayers {
        /// JSON array of player records
        path: PathBuf,
    },

    /// Print the player catalog
    #[command(alias = "ls")]
    Players {
        /// Only show one position
        #[arg(long, short)]
        position: Option<String>,
    },
}
