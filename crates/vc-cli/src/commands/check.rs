//! Check command
//!
//! Restore a snapshot and report whether it is consistent.

use anyhow::Result;

use super::Workspace;

/// Execute the check command
pub fn execute(workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    let (_, store) = workspace.load_store()?;
    let videos = store.videos();

    println!(
        "{} {} comments across {} videos are consistent.",
        "✓".green(),
        store.len(),
        videos.len()
    );

    for video in &videos {
        let stats = store.stats(video);
        println!(
            "  {} {} comments, {} replies",
            video.to_string().dimmed(),
            stats.total_comments.to_string().cyan(),
            stats.total_replies.to_string().cyan()
        );
    }

    Ok(())
}
