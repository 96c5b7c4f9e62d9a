//! Comment store: the authoritative collection of comments

use super::builder::CommentBuilder;
use super::index::CommentIndex;
use super::model::{Author, Comment, CommentFilter, CommentFormData, CommentStats, SortBy};
use super::validator::CommentValidator;
use crate::config::{CommentsConfig, DeletePolicy};
use crate::error::{Result, VcError};
use crate::types::{CommentId, UserId, VideoId};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// A stored comment plus its creation sequence number.
///
/// The sequence breaks timestamp ties so listings are deterministic.
#[derive(Debug, Clone)]
struct Entry {
    comment: Comment,
    seq: u64,
}

impl Entry {
    fn chronological(&self, other: &Entry) -> Ordering {
        self.comment
            .timestamp
            .cmp(&other.comment.timestamp)
            .then(self.seq.cmp(&other.seq))
    }
}

/// In-memory store for the comments of any number of videos
#[derive(Debug, Clone)]
pub struct CommentStore {
    /// All comments by ID
    entries: HashMap<CommentId, Entry>,
    /// Parent/child and per-video index
    index: CommentIndex,
    validator: CommentValidator,
    delete_policy: DeletePolicy,
    next_seq: u64,
}

impl CommentStore {
    /// Create an empty store with default settings
    pub fn new() -> Self {
        Self::with_config(&CommentsConfig::default())
    }

    /// Create an empty store with the given settings
    pub fn with_config(config: &CommentsConfig) -> Self {
        Self {
            entries: HashMap::new(),
            index: CommentIndex::new(),
            validator: CommentValidator::with_max_length(config.max_content_length),
            delete_policy: config.delete_policy,
            next_seq: 0,
        }
    }

    /// Create a comment (or a reply when `form.parent_id` is set)
    pub fn create(
        &mut self,
        video_id: VideoId,
        author: Author,
        form: CommentFormData,
    ) -> Result<Comment> {
        let content = self.validator.validate_content(&form.content)?.to_string();

        if let Some(parent_id) = &form.parent_id {
            let parent = self
                .entries
                .get(parent_id)
                .map(|entry| &entry.comment)
                .filter(|parent| parent.video_id == video_id)
                .ok_or_else(|| VcError::CommentNotFound(parent_id.to_string()))?;

            if parent.is_reply() {
                return Err(VcError::Validation(format!(
                    "Cannot reply to {}: it is already a reply",
                    parent_id
                )));
            }
        }

        let form = CommentFormData {
            content,
            parent_id: form.parent_id,
        };
        let comment = CommentBuilder::from_form(video_id, author, form).build()?;

        debug!(
            "Created comment {} on video {} (reply: {})",
            comment.id,
            comment.video_id,
            comment.is_reply()
        );
        self.insert(comment.clone());
        Ok(comment)
    }

    /// Replace a comment's content; only its author may do so
    pub fn edit(&mut self, id: &CommentId, editor: &UserId, new_content: &str) -> Result<Comment> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| VcError::CommentNotFound(id.to_string()))?;

        if &entry.comment.user_id != editor {
            return Err(VcError::Forbidden(format!(
                "User {} is not the author of comment {}",
                editor, id
            )));
        }

        let content = self.validator.validate_content(new_content)?;
        entry.comment.update_content(content);

        debug!("Edited comment {}", id);
        Ok(entry.comment.clone())
    }

    /// Delete a comment and apply the delete policy to its replies.
    ///
    /// Returns every comment removed from the store, the target first.
    pub fn delete(&mut self, id: &CommentId) -> Result<Vec<Comment>> {
        let entry = self
            .entries
            .remove(id)
            .ok_or_else(|| VcError::CommentNotFound(id.to_string()))?;
        self.index.remove(&entry.comment);

        let reply_ids = self.index.replies(id).to_vec();
        let mut removed = vec![entry.comment];

        match self.delete_policy {
            DeletePolicy::Cascade => {
                for reply_id in &reply_ids {
                    if let Some(reply) = self.entries.remove(reply_id) {
                        self.index.remove(&reply.comment);
                        removed.push(reply.comment);
                    }
                }
            }
            DeletePolicy::Promote => {
                for reply_id in &reply_ids {
                    if let Some(reply) = self.entries.get_mut(reply_id) {
                        self.index.remove(&reply.comment);
                        reply.comment.parent_id = None;
                        self.index.add(&reply.comment);
                    }
                }
            }
        }

        debug!(
            "Deleted comment {} ({} replies, policy {:?})",
            id,
            reply_ids.len(),
            self.delete_policy
        );
        Ok(removed)
    }

    /// Like the comment for `user`, or remove their like if present
    pub fn toggle_like(&mut self, id: &CommentId, user: &UserId) -> Result<Comment> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| VcError::CommentNotFound(id.to_string()))?;

        let liked = entry.comment.toggle_like(user);
        debug!(
            "User {} {} comment {} ({} likes)",
            user,
            if liked { "liked" } else { "unliked" },
            id,
            entry.comment.likes
        );
        Ok(entry.comment.clone())
    }

    /// List the top-level comments of a video
    pub fn list(&self, video_id: &VideoId, filter: &CommentFilter) -> Vec<Comment> {
        let mut entries: Vec<&Entry> = self
            .index
            .top_level(video_id)
            .iter()
            .filter_map(|id| self.entries.get(id))
            .collect();

        entries.sort_by(|a, b| compare(filter.sort_by, a, b));

        entries
            .into_iter()
            .map(|entry| self.materialize(entry, filter.show_replies))
            .collect()
    }

    /// Aggregate counts for a video
    pub fn stats(&self, video_id: &VideoId) -> CommentStats {
        CommentStats {
            total_comments: self.index.top_level_count(video_id),
            total_replies: self.index.reply_count(video_id),
        }
    }

    /// Get a comment by ID
    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        self.entries.get(id).map(|entry| &entry.comment)
    }

    /// Replies to a comment, oldest first
    pub fn replies(&self, id: &CommentId) -> Result<Vec<Comment>> {
        if !self.entries.contains_key(id) {
            return Err(VcError::CommentNotFound(id.to_string()));
        }
        Ok(self
            .sorted_replies(id)
            .into_iter()
            .map(|entry| entry.comment.clone())
            .collect())
    }

    /// The thread containing a comment: its top-level comment with replies populated
    pub fn thread(&self, id: &CommentId) -> Result<Comment> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| VcError::CommentNotFound(id.to_string()))?;

        let root = match &entry.comment.parent_id {
            Some(parent_id) => self
                .entries
                .get(parent_id)
                .ok_or_else(|| VcError::CommentNotFound(parent_id.to_string()))?,
            None => entry,
        };

        Ok(self.materialize(root, true))
    }

    /// Check whether `user` liked a comment
    pub fn has_liked(&self, id: &CommentId, user: &UserId) -> Result<bool> {
        self.get(id)
            .map(|comment| comment.has_liked(user))
            .ok_or_else(|| VcError::CommentNotFound(id.to_string()))
    }

    /// All videos that have comments, sorted
    pub fn videos(&self) -> Vec<VideoId> {
        self.index.videos().into_iter().cloned().collect()
    }

    /// Get all comments in creation order
    pub fn all_sorted(&self) -> Vec<&Comment> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by_key(|entry| entry.seq);
        entries.into_iter().map(|entry| &entry.comment).collect()
    }

    /// Get total comment count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an already validated comment
    pub(crate) fn insert(&mut self, comment: Comment) {
        self.index.add(&comment);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(comment.id.clone(), Entry { comment, seq });
    }

    pub(crate) fn validator(&self) -> &CommentValidator {
        &self.validator
    }

    fn sorted_replies(&self, parent_id: &CommentId) -> Vec<&Entry> {
        let mut replies: Vec<&Entry> = self
            .index
            .replies(parent_id)
            .iter()
            .filter_map(|id| self.entries.get(id))
            .collect();
        replies.sort_by(|a, b| a.chronological(b));
        replies
    }

    fn materialize(&self, entry: &Entry, with_replies: bool) -> Comment {
        let mut comment = entry.comment.clone();
        if with_replies {
            comment.replies = Some(
                self.sorted_replies(&comment.id)
                    .into_iter()
                    .map(|reply| reply.comment.clone())
                    .collect(),
            );
        }
        comment
    }
}

impl Default for CommentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(sort_by: SortBy, a: &Entry, b: &Entry) -> Ordering {
    match sort_by {
        SortBy::Newest => b.chronological(a),
        SortBy::Oldest => a.chronological(b),
        SortBy::MostLiked => b
            .comment
            .likes
            .cmp(&a.comment.likes)
            .then_with(|| b.chronological(a)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::model::UserRole;
    use pretty_assertions::assert_eq;

    fn video() -> VideoId {
        VideoId::from("video-1")
    }

    fn student(id: &str) -> Author {
        Author::new(id, format!("Student {}", id), UserRole::Student)
    }

    fn post(store: &mut CommentStore, content: &str) -> Comment {
        store
            .create(video(), student("author"), CommentFormData::new(content))
            .unwrap()
    }

    fn reply(store: &mut CommentStore, parent: &Comment, content: &str) -> Comment {
        store
            .create(
                video(),
                student("replier"),
                CommentFormData::reply(parent.id.clone(), content),
            )
            .unwrap()
    }

    fn like(store: &mut CommentStore, comment: &Comment, count: usize) {
        for i in 0..count {
            store
                .toggle_like(&comment.id, &UserId::from_string(format!("fan-{}", i)))
                .unwrap();
        }
    }

    fn contents(comments: &[Comment]) -> Vec<&str> {
        comments.iter().map(|c| c.content.as_str()).collect()
    }

    #[test]
    fn test_create_defaults() {
        let mut store = CommentStore::new();
        let comment = post(&mut store, "  First!  ");

        assert_eq!(comment.content, "First!");
        assert_eq!(comment.likes, 0);
        assert!(comment.liked_by.is_empty());
        assert!(!comment.is_edited);
        assert!(comment.edited_at.is_none());
        assert!(comment.replies.is_none());
        assert_eq!(store.get(&comment.id), Some(&comment));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_rejects_blank_content() {
        let mut store = CommentStore::new();
        for content in ["", "   ", "\n\t"] {
            let err = store
                .create(video(), student("u1"), CommentFormData::new(content))
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_overlong_content() {
        let config = CommentsConfig {
            max_content_length: 5,
            ..Default::default()
        };
        let mut store = CommentStore::with_config(&config);
        let result = store.create(video(), student("u1"), CommentFormData::new("too long"));
        assert!(matches!(result, Err(VcError::Validation(_))));
    }

    #[test]
    fn test_create_reply_requires_existing_parent() {
        let mut store = CommentStore::new();
        let result = store.create(
            video(),
            student("u1"),
            CommentFormData::reply(CommentId::new(), "Orphan"),
        );
        assert!(matches!(result, Err(VcError::CommentNotFound(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_reply_requires_same_video() {
        let mut store = CommentStore::new();
        let parent = post(&mut store, "On video 1");

        let result = store.create(
            VideoId::from("video-2"),
            student("u1"),
            CommentFormData::reply(parent.id.clone(), "Wrong video"),
        );
        assert!(matches!(result, Err(VcError::CommentNotFound(_))));
    }

    #[test]
    fn test_reply_to_reply_rejected() {
        let mut store = CommentStore::new();
        let parent = post(&mut store, "Question");
        let answer = reply(&mut store, &parent, "Answer");

        let result = store.create(
            video(),
            student("u1"),
            CommentFormData::reply(answer.id.clone(), "Nested"),
        );
        assert!(matches!(result, Err(VcError::Validation(_))));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_edit_by_author() {
        let mut store = CommentStore::new();
        let comment = post(&mut store, "Teh answer");

        let edited = store
            .edit(&comment.id, &UserId::from("author"), " The answer ")
            .unwrap();

        assert_eq!(edited.content, "The answer");
        assert!(edited.is_edited);
        assert!(edited.edited_at.is_some());
        assert_eq!(edited.timestamp, comment.timestamp);
        assert_eq!(store.get(&comment.id), Some(&edited));
    }

    #[test]
    fn test_edit_failures_leave_comment_unchanged() {
        let mut store = CommentStore::new();
        let comment = post(&mut store, "Original");

        let not_found = store.edit(&CommentId::new(), &UserId::from("author"), "x");
        assert!(matches!(not_found, Err(VcError::CommentNotFound(_))));

        let empty = store.edit(&comment.id, &UserId::from("author"), "  ");
        assert!(matches!(empty, Err(VcError::Validation(_))));

        let forbidden = store.edit(&comment.id, &UserId::from("someone-else"), "Hijack");
        assert!(matches!(forbidden, Err(VcError::Forbidden(_))));

        assert_eq!(store.get(&comment.id), Some(&comment));
    }

    #[test]
    fn test_toggle_like_is_an_involution() {
        let mut store = CommentStore::new();
        let a = post(&mut store, "A");
        let u1 = UserId::from("u1");

        let liked = store.toggle_like(&a.id, &u1).unwrap();
        assert_eq!(liked.likes, 1);
        assert!(store.has_liked(&a.id, &u1).unwrap());

        let back = store.toggle_like(&a.id, &u1).unwrap();
        assert_eq!(back.likes, a.likes);
        assert_eq!(back.liked_by, a.liked_by);
        assert!(!store.has_liked(&a.id, &u1).unwrap());
    }

    #[test]
    fn test_likes_match_likers_after_any_sequence() {
        let mut store = CommentStore::new();
        let a = post(&mut store, "A");
        let users: Vec<UserId> = (0..5).map(|i| UserId::from_string(format!("u{}", i))).collect();

        // A fixed but irregular toggle pattern
        for step in 0..40usize {
            let user = &users[(step * 7 + step / 3) % users.len()];
            let comment = store.toggle_like(&a.id, user).unwrap();
            assert_eq!(comment.likes, comment.liked_by.len());

            let mut unique = comment.liked_by.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), comment.liked_by.len());
        }
    }

    #[test]
    fn test_toggle_like_unknown_comment() {
        let mut store = CommentStore::new();
        let result = store.toggle_like(&CommentId::new(), &UserId::from("u1"));
        assert!(matches!(result, Err(VcError::CommentNotFound(_))));
    }

    #[test]
    fn test_list_most_liked_example() {
        let mut store = CommentStore::new();
        let a = post(&mut store, "A");
        let b = post(&mut store, "B");
        let c = post(&mut store, "C");
        like(&mut store, &a, 0);
        like(&mut store, &b, 3);
        like(&mut store, &c, 1);

        let listed = store.list(&video(), &CommentFilter::new(SortBy::MostLiked, false));
        assert_eq!(contents(&listed), vec!["B", "C", "A"]);

        let likes: Vec<usize> = listed.iter().map(|c| c.likes).collect();
        assert!(likes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_list_most_liked_ties_newest_first() {
        let mut store = CommentStore::new();
        let older = post(&mut store, "older");
        let newer = post(&mut store, "newer");
        like(&mut store, &older, 2);
        like(&mut store, &newer, 2);

        let listed = store.list(&video(), &CommentFilter::new(SortBy::MostLiked, false));
        assert_eq!(contents(&listed), vec!["newer", "older"]);
    }

    #[test]
    fn test_list_newest_and_oldest() {
        let mut store = CommentStore::new();
        post(&mut store, "first");
        post(&mut store, "second");
        post(&mut store, "third");

        let newest = store.list(&video(), &CommentFilter::new(SortBy::Newest, false));
        assert_eq!(contents(&newest), vec!["third", "second", "first"]);

        let oldest = store.list(&video(), &CommentFilter::new(SortBy::Oldest, false));
        assert_eq!(contents(&oldest), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_list_only_top_level_of_video() {
        let mut store = CommentStore::new();
        let parent = post(&mut store, "parent");
        reply(&mut store, &parent, "child");
        store
            .create(
                VideoId::from("video-2"),
                student("u1"),
                CommentFormData::new("elsewhere"),
            )
            .unwrap();

        let listed = store.list(&video(), &CommentFilter::new(SortBy::Newest, false));
        assert_eq!(contents(&listed), vec!["parent"]);
        assert!(listed[0].replies.is_none());

        assert!(store
            .list(&VideoId::from("unknown"), &CommentFilter::default())
            .is_empty());
    }

    #[test]
    fn test_list_with_replies_oldest_first() {
        let mut store = CommentStore::new();
        let parent = post(&mut store, "parent");
        reply(&mut store, &parent, "r1");
        reply(&mut store, &parent, "r2");
        let lonely = post(&mut store, "lonely");

        let listed = store.list(&video(), &CommentFilter::new(SortBy::Oldest, true));
        assert_eq!(listed.len(), 2);

        let replies = listed[0].replies.as_ref().unwrap();
        assert_eq!(contents(replies), vec!["r1", "r2"]);
        assert!(replies.iter().all(|r| r.parent_id == Some(parent.id.clone())));

        assert_eq!(listed[1].id, lonely.id);
        assert_eq!(listed[1].replies, Some(vec![]));
    }

    #[test]
    fn test_stats() {
        let mut store = CommentStore::new();
        let a = post(&mut store, "A");
        let b = post(&mut store, "B");
        reply(&mut store, &a, "a1");
        reply(&mut store, &a, "a2");
        reply(&mut store, &b, "b1");

        let stats = store.stats(&video());
        assert_eq!(stats.total_comments, 2);
        assert_eq!(stats.total_replies, 3);
        assert_eq!(stats.total(), store.len());

        assert_eq!(store.stats(&VideoId::from("other")), CommentStats::default());
    }

    #[test]
    fn test_delete_cascades_by_default() {
        let mut store = CommentStore::new();
        let parent = post(&mut store, "parent");
        let r1 = reply(&mut store, &parent, "r1");
        let keep = post(&mut store, "keep");

        let removed = store.delete(&parent.id).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].id, parent.id);
        assert!(store.get(&r1.id).is_none());
        assert!(store.get(&keep.id).is_some());

        let stats = store.stats(&video());
        assert_eq!(stats.total_comments, 1);
        assert_eq!(stats.total_replies, 0);
    }

    #[test]
    fn test_delete_promotes_replies() {
        let config = CommentsConfig {
            delete_policy: DeletePolicy::Promote,
            ..Default::default()
        };
        let mut store = CommentStore::with_config(&config);
        let parent = post(&mut store, "parent");
        let r1 = reply(&mut store, &parent, "r1");

        let removed = store.delete(&parent.id).unwrap();
        assert_eq!(removed.len(), 1);

        let promoted = store.get(&r1.id).unwrap();
        assert!(promoted.is_top_level());

        let listed = store.list(&video(), &CommentFilter::default());
        assert_eq!(contents(&listed), vec!["r1"]);
        assert_eq!(store.stats(&video()).total_replies, 0);
    }

    #[test]
    fn test_delete_reply_only() {
        let mut store = CommentStore::new();
        let parent = post(&mut store, "parent");
        let r1 = reply(&mut store, &parent, "r1");

        store.delete(&r1.id).unwrap();
        assert!(store.replies(&parent.id).unwrap().is_empty());
        assert_eq!(store.stats(&video()).total_comments, 1);
    }

    #[test]
    fn test_delete_unknown() {
        let mut store = CommentStore::new();
        let err = store.delete(&CommentId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_thread_from_reply() {
        let mut store = CommentStore::new();
        let parent = post(&mut store, "parent");
        let r1 = reply(&mut store, &parent, "r1");

        let thread = store.thread(&r1.id).unwrap();
        assert_eq!(thread.id, parent.id);
        assert_eq!(thread.reply_count(), 1);
    }

    #[test]
    fn test_videos() {
        let mut store = CommentStore::new();
        post(&mut store, "one");
        store
            .create(VideoId::from("a-video"), student("u1"), CommentFormData::new("two"))
            .unwrap();

        assert_eq!(store.videos(), vec![VideoId::from("a-video"), video()]);
    }
}
