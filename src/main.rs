//! dragonsave CLI - encrypted, password-gated game save files.
//!
//! Usage:
//!   dragonsave save <user> '<json>'    - Create or overwrite a save
//!   dragonsave update <user> '<json>'  - Replace progress, keep password
//!   dragonsave load <user>             - Print progress
//!   dragonsave exists <user>           - Check for a save
//!   dragonsave key                     - Ensure the key exists
//!   dragonsave init                    - Write a config file

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("dragonsave={}", log_level).parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // init writes the --config file, so it must not be required to exist yet
    let config_source = match cli.command {
        Commands::Init { .. } => None,
        _ => cli.config.as_deref(),
    };
    let config = cli::commands::resolve_config(config_source, cli.base_dir.as_deref())?;

    match cli.command {
        Commands::Save { username, progress } => {
            cli::commands::save(&config, &username, &progress, cli.password_stdin)?;
        }
        Commands::Update { username, progress } => {
            cli::commands::update(&config, &username, &progress, cli.password_stdin)?;
        }
        Commands::Load { username, pretty } => {
            cli::commands::load(&config, &username, pretty, cli.password_stdin)?;
        }
        Commands::Exists { username } => {
            cli::commands::exists(&config, &username)?;
        }
        Commands::Key => {
            cli::commands::key(&config)?;
        }
        Commands::Init { force } => {
            cli::commands::init(&config, cli.config.as_deref(), force)?;
        }
    }

    Ok(())
}
