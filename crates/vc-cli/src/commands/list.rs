//! List command
//!
//! List the top-level comments of a video.

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::output::print_comment;
use super::Workspace;
use vc_core::comment::{CommentFilter, SortBy};
use vc_core::types::VideoId;

/// Sort order options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Newest first
    Newest,
    /// Oldest first
    Oldest,
    /// Most likes first
    MostLiked,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => SortBy::Newest,
            SortArg::Oldest => SortBy::Oldest,
            SortArg::MostLiked => SortBy::MostLiked,
        }
    }
}

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Video ID
    #[arg(long)]
    pub video: String,

    /// Sort order (defaults to listing.default_sort)
    #[arg(long, short, value_enum)]
    pub sort: Option<SortArg>,

    /// Include replies
    #[arg(long, conflicts_with = "no_replies")]
    pub replies: bool,

    /// Omit replies
    #[arg(long)]
    pub no_replies: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Build the filter, falling back to configured defaults
    pub fn filter(&self, defaults: CommentFilter) -> CommentFilter {
        let show_replies = if self.replies {
            true
        } else if self.no_replies {
            false
        } else {
            defaults.show_replies
        };

        CommentFilter::new(
            self.sort.map(SortBy::from).unwrap_or(defaults.sort_by),
            show_replies,
        )
    }
}

/// Execute the list command
pub fn execute(workspace: &Workspace, args: ListArgs) -> Result<()> {
    use colored::Colorize;

    let (config, store) = workspace.load_store()?;
    let filter = args.filter(CommentFilter::from(&config.listing));
    let video = VideoId::from_string(args.video.as_str());

    let comments = store.list(&video, &filter);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comments)?);
        return Ok(());
    }

    if comments.is_empty() {
        println!("No comments for video '{}'.", video);
        return Ok(());
    }

    println!(
        "{} {} ({}, sorted by {})",
        "Comments on".bold().underline(),
        video.to_string().green(),
        comments.len(),
        filter.sort_by
    );
    println!();

    for comment in &comments {
        print_comment(comment);
    }

    Ok(())
}
