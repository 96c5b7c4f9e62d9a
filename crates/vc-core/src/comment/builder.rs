//! Comment builder for fluent API

use super::model::{Author, Comment, CommentFormData};
use crate::error::{Result, VcError};
use crate::types::{CommentId, VideoId};
use chrono::{DateTime, Utc};

/// Builder for creating comments with fluent API
pub struct CommentBuilder {
    video_id: VideoId,
    author: Author,
    content: Option<String>,
    parent_id: Option<CommentId>,
    timestamp: Option<DateTime<Utc>>,
}

impl CommentBuilder {
    /// Create a new builder for a comment on `video_id` by `author`
    pub fn new(video_id: VideoId, author: Author) -> Self {
        Self {
            video_id,
            author,
            content: None,
            parent_id: None,
            timestamp: None,
        }
    }

    /// Create a builder pre-filled from submitted form data
    pub fn from_form(video_id: VideoId, author: Author, form: CommentFormData) -> Self {
        Self {
            video_id,
            author,
            content: Some(form.content),
            parent_id: form.parent_id,
            timestamp: None,
        }
    }

    /// Set the comment content
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Make this comment a reply to `parent_id`
    pub fn reply_to(mut self, parent_id: CommentId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Override the creation time (defaults to now)
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Build the comment
    pub fn build(self) -> Result<Comment> {
        let content = self
            .content
            .ok_or_else(|| VcError::Validation("Comment content is required".to_string()))?;

        let content = content.trim();
        if content.is_empty() {
            return Err(VcError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }

        Ok(Comment {
            id: CommentId::new(),
            video_id: self.video_id,
            user_id: self.author.user_id,
            user_name: self.author.user_name,
            user_role: self.author.user_role,
            content: content.to_string(),
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            parent_id: self.parent_id,
            replies: None,
            likes: 0,
            liked_by: Vec::new(),
            is_edited: false,
            edited_at: None,
        })
    }
}
