//! CLI adapter for Sextant
//!
//! Loads a definition file, runs the mapping pipeline and reports the
//! result. Depends on `core/`; nothing in `core/` depends on it.
//!
//! # Architecture
//!
//! ```text
//! +------------------+      +------------------+
//! |      cli/        | ---> |      core/       |
//! | (clap adapter)   |      |  (domain logic)  |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use crate::core::config::Config;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Sextant - search mapping resolution pipeline
///
/// Resolves alias mappings from a TOML definition file: inheritance,
/// converters, index paths, ids and sub-indexes.
#[derive(Parser, Debug)]
#[command(name = "sextant")]
#[command(version)]
#[command(about = "Search mapping resolution pipeline", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Definition file (defaults to SEXTANT_CONFIG, the XDG config file, then ./sextant.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the configuration and print the resolved aliases
    Resolve(commands::ResolveArgs),

    /// Resolve an alias or metadata placeholder such as ${group.id}
    Lookup(commands::LookupArgs),

    /// Show flattened settings or the groups below a prefix
    Settings(commands::SettingsArgs),

    /// List the processor chain stages in execution order
    Stages(commands::StagesArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  sextant completions bash > ~/.local/share/bash-completion/completions/sextant
    ///   zsh:   sextant completions zsh > ~/.zfunc/_sextant
    ///   fish:  sextant completions fish > ~/.config/fish/completions/sextant.fish
    Completions(commands::CompletionsArgs),
}

/// Load the definition file named on the command line, or discover one
pub fn load_config(path: Option<&Path>) -> crate::core::error::Result<Config> {
    let config = match path {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.merge_env();
            config.validate()?;
            config
        }
        None => Config::load()?,
    };
    config.log_config();
    Ok(config)
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let format = cli.format;
    let config_path = cli.config;

    match cli.command {
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Stages(args) => commands::stages::execute(args, format),
        Commands::Resolve(args) => {
            let config = load_config(config_path.as_deref())?;
            commands::resolve::execute(args, config, format)
        }
        Commands::Lookup(args) => {
            let config = load_config(config_path.as_deref())?;
            commands::lookup::execute(args, config, format)
        }
        Commands::Settings(args) => {
            let config = load_config(config_path.as_deref())?;
            commands::settings::execute(args, &config, format)
        }
    }
}
