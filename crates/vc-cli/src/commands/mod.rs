//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod check;
pub mod config;
pub mod list;
mod output;
pub mod show;
pub mod stats;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vc_core::comment::{CommentSnapshot, CommentStore};
use vc_core::config::Config;

/// Default snapshot location
pub const DEFAULT_FILE: &str = ".vidcomments/comments.json";

/// Default configuration location
pub const DEFAULT_CONFIG: &str = ".vidcomments/config.toml";

/// vidcomments - inspect threaded video comments
#[derive(Debug, Parser)]
#[command(name = "vidcomments")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VIDCOMMENTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Comment snapshot (JSON) to read
    #[arg(short, long, global = true, env = "VIDCOMMENTS_FILE")]
    pub file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the top-level comments of a video
    List(list::ListArgs),

    /// Show comment and reply counts for a video
    Stats(stats::StatsArgs),

    /// Show the thread containing a comment
    Show(show::ShowArgs),

    /// Verify that a snapshot satisfies every comment invariant
    Check,

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Resolved file locations shared by all commands
#[derive(Debug, Clone)]
pub struct Workspace {
    pub config_path: PathBuf,
    pub file_path: PathBuf,
}

impl Workspace {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            config_path: cli
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG)),
            file_path: cli.file.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_FILE)),
        }
    }

    /// Load the configuration, falling back to defaults when absent
    pub fn load_config(&self) -> Result<Config> {
        Config::load(&self.config_path)
            .with_context(|| format!("Invalid configuration: {}", self.config_path.display()))
    }

    /// Load the configuration and restore the comment snapshot
    pub fn load_store(&self) -> Result<(Config, CommentStore)> {
        let config = self.load_config()?;
        let store = restore_store(&self.file_path, &config)?;
        Ok((config, store))
    }
}

fn restore_store(path: &Path, config: &Config) -> Result<CommentStore> {
    let snapshot = CommentSnapshot::load(path)
        .with_context(|| format!("Failed to read comments from {}", path.display()))?;
    let store = CommentStore::restore(snapshot, &config.comments)
        .with_context(|| format!("Comments in {} are inconsistent", path.display()))?;
    tracing::debug!("Loaded {} comments from {:?}", store.len(), path);
    Ok(store)
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let workspace = Workspace::from_cli(&cli);

    // Dispatch to command handler
    match cli.command {
        Commands::List(args) => list::execute(&workspace, args),
        Commands::Stats(args) => stats::execute(&workspace, args),
        Commands::Show(args) => show::execute(&workspace, args),
        Commands::Check => check::execute(&workspace),
        Commands::Config(cmd) => config::execute(&workspace, cmd),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_default_paths() {
        let cli = Cli::try_parse_from(["vidcomments", "check"]).unwrap();
        let workspace = Workspace::from_cli(&cli);
        assert_eq!(workspace.file_path, PathBuf::from(DEFAULT_FILE));
        assert_eq!(workspace.config_path, PathBuf::from(DEFAULT_CONFIG));
    }

    #[test]
    fn test_global_file_after_subcommand() {
        let cli =
            Cli::try_parse_from(["vidcomments", "stats", "--video", "v1", "--file", "c.json"])
                .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("c.json")));
    }
}
