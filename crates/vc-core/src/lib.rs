//! vc-core - Core library for vidcomments
//!
//! This crate provides a threaded comment store for videos: comments with one
//! level of replies, likes, query-time sorting and per-video stats.
//!
//! # Example
//!
//! ```
//! use vc_core::comment::{Author, CommentFilter, CommentFormData, CommentStore, SortBy, UserRole};
//! use vc_core::types::{UserId, VideoId};
//!
//! let mut store = CommentStore::new();
//! let video = VideoId::from("intro-101");
//! let author = Author::new("u1", "Ada", UserRole::Student);
//!
//! let form = CommentFormData::new("Is this on the exam?");
//! let question = store.create(video.clone(), author, form)?;
//! store.toggle_like(&question.id, &UserId::from("u2"))?;
//!
//! let listed = store.list(&video, &CommentFilter::new(SortBy::MostLiked, true));
//! assert_eq!(listed[0].likes, 1);
//! assert_eq!(store.stats(&video).total_comments, 1);
//! # Ok::<(), vc_core::VcError>(())
//! ```

pub mod comment;
pub mod config;
pub mod error;
pub mod types;

pub use error::{Result, VcError};
pub use types::*;
