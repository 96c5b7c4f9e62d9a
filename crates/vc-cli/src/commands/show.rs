//! Show command
//!
//! Print the thread containing a comment.

use anyhow::{Context, Result};
use clap::Args;

use super::output::print_comment;
use super::Workspace;
use vc_core::types::CommentId;

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Comment ID (a top-level comment or one of its replies)
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the show command
pub fn execute(workspace: &Workspace, args: ShowArgs) -> Result<()> {
    let id = CommentId::from_string(&args.id)
        .with_context(|| format!("Invalid comment ID: {}", args.id))?;

    let (_, store) = workspace.load_store()?;
    let thread = store
        .thread(&id)
        .with_context(|| format!("Comment '{}' not found", args.id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&thread)?);
        return Ok(());
    }

    print_comment(&thread);
    Ok(())
}
