//! Config command
//!
//! Manage vidcomments configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;

use super::Workspace;
use vc_core::config::Config;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command
pub fn execute(workspace: &Workspace, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(workspace, json),
        ConfigCommand::Init { force } => init_config(workspace, force),
    }
}

fn show_config(workspace: &Workspace, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config = workspace.load_config()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    let source = if workspace.config_path.exists() {
        workspace.config_path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", workspace.config_path.display())
    };
    println!("{}", source.dimmed());
    println!();
    println!("{}", config.to_toml_string()?);

    Ok(())
}

fn init_config(workspace: &Workspace, force: bool) -> Result<()> {
    use colored::Colorize;

    let path = &workspace.config_path;

    if path.exists() && !force {
        eprintln!(
            "{} {} already exists. Use {} to overwrite.",
            "⚠".yellow(),
            path.display(),
            "--force".cyan()
        );
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = Config::default().to_toml_string()?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Wrote {}", "✓".green(), path.display());
    Ok(())
}
