//! Stats command
//!
//! Show comment and reply counts for a video.

use anyhow::Result;
use clap::Args;

use super::Workspace;
use vc_core::types::VideoId;

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Video ID
    #[arg(long)]
    pub video: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the stats command
pub fn execute(workspace: &Workspace, args: StatsArgs) -> Result<()> {
    use colored::Colorize;

    let (_, store) = workspace.load_store()?;
    let video = VideoId::from_string(args.video);
    let stats = store.stats(&video);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{} {}", "Video".bold(), video.to_string().green());
    println!("  Comments: {}", stats.total_comments.to_string().cyan());
    println!("  Replies:  {}", stats.total_replies.to_string().cyan());
    println!("  Total:    {}", stats.total().to_string().yellow());

    Ok(())
}
