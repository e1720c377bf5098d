//! CLI definitions and command implementations for dragonsave.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// dragonsave - Encrypted, password-gated game save files
#[derive(Parser)]
#[command(name = "dragonsave")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding key.bin and the save files (overrides config)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Path to config file (default: <config dir>/dragonsave/dragonsave.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read the password as one line from stdin instead of prompting
    #[arg(long, global = true)]
    pub password_stdin: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Progress given inline as JSON or read from a file
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct ProgressInput {
    /// Progress as a JSON document
    pub json: Option<String>,

    /// Read progress JSON from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or overwrite a user's save (sets the password)
    Save {
        username: String,
        #[command(flatten)]
        progress: ProgressInput,
    },

    /// Replace progress of an existing save, keeping its password
    Update {
        username: String,
        #[command(flatten)]
        progress: ProgressInput,
    },

    /// Print a user's progress as JSON
    Load {
        username: String,
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Check whether a save exists for a user
    Exists { username: String },

    /// Make sure the encryption key exists and print its path
    Key,

    /// Write a config file with the current settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
