//! Comment data models

use crate::types::{CommentId, UserId, VideoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A comment (or reply) attached to a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,
    /// Video this comment belongs to
    pub video_id: VideoId,
    /// Author identifier
    pub user_id: UserId,
    /// Author display name
    pub user_name: String,
    /// Author role
    pub user_role: UserRole,
    /// Comment body
    pub content: String,
    /// When the comment was created
    pub timestamp: DateTime<Utc>,
    /// Parent comment, set on replies only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
    /// Replies, populated on query results only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<Comment>>,
    /// Number of distinct likers
    pub likes: usize,
    /// Users who liked this comment, in liking order
    #[serde(default)]
    pub liked_by: Vec<UserId>,
    /// Whether the content was edited after creation
    #[serde(default)]
    pub is_edited: bool,
    /// When the content was last edited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Check if this comment is a reply
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Check if this comment is top-level
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check whether `user` liked this comment
    pub fn has_liked(&self, user: &UserId) -> bool {
        self.liked_by.contains(user)
    }

    /// Flip `user`'s like; returns true when the comment is now liked by them
    pub fn toggle_like(&mut self, user: &UserId) -> bool {
        let liked = if let Some(pos) = self.liked_by.iter().position(|u| u == user) {
            self.liked_by.remove(pos);
            false
        } else {
            self.liked_by.push(user.clone());
            true
        };
        self.likes = self.liked_by.len();
        liked
    }

    /// Replace the content and mark the comment as edited
    pub fn update_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.is_edited = true;
        self.edited_at = Some(Utc::now());
    }

    /// Number of populated replies (zero when replies were not requested)
    pub fn reply_count(&self) -> usize {
        self.replies.as_ref().map(Vec::len).unwrap_or(0)
    }
}

/// Role of a comment author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Admin,
    Instructor,
}

impl UserRole {
    /// Lowercase name, as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Admin => "admin",
            UserRole::Instructor => "instructor",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = crate::VcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "admin" => Ok(UserRole::Admin),
            "instructor" => Ok(UserRole::Instructor),
            other => Err(crate::VcError::Validation(format!(
                "Unknown user role: {}",
                other
            ))),
        }
    }
}

/// Identity of the user writing a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub user_id: UserId,
    pub user_name: String,
    pub user_role: UserRole,
}

impl Author {
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        user_role: UserRole,
    ) -> Self {
        Self {
            user_id: UserId::from_string(user_id),
            user_name: user_name.into(),
            user_role,
        }
    }
}

/// Input for a new comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentFormData {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
}

impl CommentFormData {
    /// Form for a top-level comment
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_id: None,
        }
    }

    /// Form for a reply to `parent_id`
    pub fn reply(parent_id: CommentId, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_id: Some(parent_id),
        }
    }
}

/// Aggregate counts for a video
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentStats {
    /// Top-level comments
    pub total_comments: usize,
    /// Comments with a parent
    pub total_replies: usize,
}

impl CommentStats {
    /// All comments for the video
    pub fn total(&self) -> usize {
        self.total_comments + self.total_replies
    }
}

/// Ordering of top-level comments in a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Timestamp descending
    #[default]
    Newest,
    /// Timestamp ascending
    Oldest,
    /// Likes descending, newest first on ties
    MostLiked,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortBy::Newest => write!(f, "newest"),
            SortBy::Oldest => write!(f, "oldest"),
            SortBy::MostLiked => write!(f, "mostLiked"),
        }
    }
}

/// Query-time view configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentFilter {
    pub sort_by: SortBy,
    pub show_replies: bool,
}

impl CommentFilter {
    pub fn new(sort_by: SortBy, show_replies: bool) -> Self {
        Self {
            sort_by,
            show_replies,
        }
    }
}

impl Default for CommentFilter {
    fn default() -> Self {
        Self::new(SortBy::Newest, true)
    }
}

impl From<&crate::config::ListingConfig> for CommentFilter {
    fn from(config: &crate::config::ListingConfig) -> Self {
        Self::new(config.default_sort, config.show_replies)
    }
}
