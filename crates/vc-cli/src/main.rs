//! vidcomments - inspect video comment snapshots
//!
//! ## Quick Start
//!
//! ```bash
//! # Write the default configuration
//! vidcomments config init
//!
//! # List the comments of a video, most liked first
//! vidcomments --file comments.json list --video intro-101 --sort most-liked
//!
//! # Per-video counts
//! vidcomments --file comments.json stats --video intro-101
//!
//! # Verify a snapshot before importing it elsewhere
//! vidcomments --file comments.json check
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
