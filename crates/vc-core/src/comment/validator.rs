//! Comment validation

use super::model::Comment;
use crate::config::DEFAULT_MAX_CONTENT_LENGTH;
use crate::error::{Result, VcError};
use std::collections::HashSet;

/// Validator for comment content and stored records
#[derive(Debug, Clone)]
pub struct CommentValidator {
    max_length: usize,
}

impl CommentValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }

    /// Create a new validator with custom max length
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Validate comment content and return it trimmed
    pub fn validate_content<'a>(&self, content: &'a str) -> Result<&'a str> {
        let trimmed = content.trim();

        if trimmed.is_empty() {
            return Err(VcError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > self.max_length {
            return Err(VcError::Validation(format!(
                "Comment content exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        Ok(trimmed)
    }

    /// Check the invariants a single stored comment must hold
    pub fn validate_record(&self, comment: &Comment) -> Result<()> {
        let id = &comment.id;

        if comment.content.trim().is_empty() {
            return Err(VcError::Integrity(format!("Comment {} has empty content", id)));
        }

        if comment.content.chars().count() > self.max_length {
            return Err(VcError::Integrity(format!(
                "Comment {} exceeds maximum length of {} characters",
                id, self.max_length
            )));
        }

        let mut seen = HashSet::with_capacity(comment.liked_by.len());
        for user in &comment.liked_by {
            if !seen.insert(user) {
                return Err(VcError::Integrity(format!(
                    "Comment {} lists liker {} more than once",
                    id, user
                )));
            }
        }

        if comment.likes != comment.liked_by.len() {
            return Err(VcError::Integrity(format!(
                "Comment {} has {} likes but {} likers",
                id,
                comment.likes,
                comment.liked_by.len()
            )));
        }

        if comment.is_edited != comment.edited_at.is_some() {
            return Err(VcError::Integrity(format!(
                "Comment {} has inconsistent edit tracking",
                id
            )));
        }

        if comment.replies.is_some() {
            return Err(VcError::Integrity(format!(
                "Comment {} carries materialized replies",
                id
            )));
        }

        if comment.parent_id.as_ref() == Some(id) {
            return Err(VcError::Integrity(format!("Comment {} replies to itself", id)));
        }

        Ok(())
    }

    /// Check that `parent` is a valid parent for `reply`
    pub fn validate_parent(&self, reply: &Comment, parent: Option<&Comment>) -> Result<()> {
        let Some(parent_id) = &reply.parent_id else {
            return Ok(());
        };

        let parent = parent.ok_or_else(|| {
            VcError::Integrity(format!(
                "Reply {} references missing parent {}",
                reply.id, parent_id
            ))
        })?;

        if parent.video_id != reply.video_id {
            return Err(VcError::Integrity(format!(
                "Reply {} is on video {} but its parent is on video {}",
                reply.id, reply.video_id, parent.video_id
            )));
        }

        if parent.is_reply() {
            return Err(VcError::Integrity(format!(
                "Reply {} is nested under another reply {}",
                reply.id, parent.id
            )));
        }

        Ok(())
    }
}

impl Default for CommentValidator {
    fn default() -> Self {
        Self::new()
    }
}
