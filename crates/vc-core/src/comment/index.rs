//! Comment indexing for fast lookup

use super::model::Comment;
use crate::types::{CommentId, VideoId};
use std::collections::HashMap;

/// Secondary index over the parent/child structure of comments
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    /// Top-level comments by video
    top_level: HashMap<VideoId, Vec<CommentId>>,
    /// Replies by video
    replies_by_video: HashMap<VideoId, Vec<CommentId>>,
    /// Replies by parent comment
    by_parent: HashMap<CommentId, Vec<CommentId>>,
}

impl CommentIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comment to the index
    pub fn add(&mut self, comment: &Comment) {
        match &comment.parent_id {
            Some(parent_id) => {
                self.by_parent
                    .entry(parent_id.clone())
                    .or_default()
                    .push(comment.id.clone());
                self.replies_by_video
                    .entry(comment.video_id.clone())
                    .or_default()
                    .push(comment.id.clone());
            }
            None => {
                self.top_level
                    .entry(comment.video_id.clone())
                    .or_default()
                    .push(comment.id.clone());
            }
        }
    }

    /// Remove a comment from the index
    pub fn remove(&mut self, comment: &Comment) {
        match &comment.parent_id {
            Some(parent_id) => {
                remove_from(&mut self.by_parent, parent_id, &comment.id);
                remove_from(&mut self.replies_by_video, &comment.video_id, &comment.id);
            }
            None => {
                remove_from(&mut self.top_level, &comment.video_id, &comment.id);
            }
        }
    }

    /// Get top-level comment IDs for a video
    pub fn top_level(&self, video_id: &VideoId) -> &[CommentId] {
        self.top_level.get(video_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get reply IDs for a parent comment
    pub fn replies(&self, parent_id: &CommentId) -> &[CommentId] {
        self.by_parent.get(parent_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of top-level comments on a video
    pub fn top_level_count(&self, video_id: &VideoId) -> usize {
        self.top_level(video_id).len()
    }

    /// Number of replies on a video
    pub fn reply_count(&self, video_id: &VideoId) -> usize {
        self.replies_by_video.get(video_id).map(Vec::len).unwrap_or(0)
    }

    /// All videos with at least one comment
    pub fn videos(&self) -> Vec<&VideoId> {
        let mut videos: Vec<&VideoId> = self
            .top_level
            .keys()
            .chain(self.replies_by_video.keys())
            .collect();
        videos.sort();
        videos.dedup();
        videos
    }
}

fn remove_from<K>(map: &mut HashMap<K, Vec<CommentId>>, key: &K, id: &CommentId)
where
    K: std::hash::Hash + Eq,
{
    if let Some(ids) = map.get_mut(key) {
        ids.retain(|existing| existing != id);
        if ids.is_empty() {
            map.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::builder::CommentBuilder;
    use crate::comment::model::{Author, UserRole};

    fn create_test_comment(video: &str, parent: Option<&Comment>) -> Comment {
        let mut builder = CommentBuilder::new(
            VideoId::from(video),
            Author::new("u1", "Ada", UserRole::Student),
        )
        .content("Test");
        if let Some(parent) = parent {
            builder = builder.reply_to(parent.id.clone());
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_add_top_level_and_reply() {
        let mut index = CommentIndex::new();
        let video = VideoId::from("v1");
        let parent = create_test_comment("v1", None);
        let reply = create_test_comment("v1", Some(&parent));

        index.add(&parent);
        index.add(&reply);

        assert_eq!(index.top_level(&video), &[parent.id.clone()]);
        assert_eq!(index.replies(&parent.id), &[reply.id.clone()]);
        assert_eq!(index.top_level_count(&video), 1);
        assert_eq!(index.reply_count(&video), 1);
    }

    #[test]
    fn test_videos_are_separate() {
        let mut index = CommentIndex::new();
        index.add(&create_test_comment("v1", None));
        index.add(&create_test_comment("v2", None));
        index.add(&create_test_comment("v2", None));

        assert_eq!(index.top_level_count(&VideoId::from("v1")), 1);
        assert_eq!(index.top_level_count(&VideoId::from("v2")), 2);
        assert_eq!(index.top_level_count(&VideoId::from("v3")), 0);
        assert_eq!(index.videos().len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut index = CommentIndex::new();
        let video = VideoId::from("v1");
        let parent = create_test_comment("v1", None);
        let reply = create_test_comment("v1", Some(&parent));

        index.add(&parent);
        index.add(&reply);
        index.remove(&reply);

        assert!(index.replies(&parent.id).is_empty());
        assert_eq!(index.reply_count(&video), 0);

        index.remove(&parent);
        assert!(index.top_level(&video).is_empty());
        assert!(index.videos().is_empty());
    }
}
