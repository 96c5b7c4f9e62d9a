//! Thread-safe handle over a comment store

use super::model::{Author, Comment, CommentFilter, CommentFormData, CommentStats};
use super::snapshot::CommentSnapshot;
use super::store::CommentStore;
use crate::error::Result;
use crate::types::{CommentId, UserId, VideoId};
use parking_lot::RwLock;
use std::sync::Arc;

/// Clonable, thread-safe handle over a [`CommentStore`].
///
/// Every mutation holds the write lock for its whole duration, so concurrent
/// likes on one comment never break `likes == liked_by.len()`.
#[derive(Debug, Clone, Default)]
pub struct SharedCommentStore {
    inner: Arc<RwLock<CommentStore>>,
}

impl SharedCommentStore {
    pub fn new(store: CommentStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn create(
        &self,
        video_id: VideoId,
        author: Author,
        form: CommentFormData,
    ) -> Result<Comment> {
        self.inner.write().create(video_id, author, form)
    }

    pub fn edit(&self, id: &CommentId, editor: &UserId, new_content: &str) -> Result<Comment> {
        self.inner.write().edit(id, editor, new_content)
    }

    pub fn delete(&self, id: &CommentId) -> Result<Vec<Comment>> {
        self.inner.write().delete(id)
    }

    pub fn toggle_like(&self, id: &CommentId, user: &UserId) -> Result<Comment> {
        self.inner.write().toggle_like(id, user)
    }

    pub fn list(&self, video_id: &VideoId, filter: &CommentFilter) -> Vec<Comment> {
        self.inner.read().list(video_id, filter)
    }

    pub fn stats(&self, video_id: &VideoId) -> CommentStats {
        self.inner.read().stats(video_id)
    }

    /// Get a copy of a comment
    pub fn get(&self, id: &CommentId) -> Option<Comment> {
        self.inner.read().get(id).cloned()
    }

    pub fn thread(&self, id: &CommentId) -> Result<Comment> {
        self.inner.read().thread(id)
    }

    pub fn snapshot(&self) -> CommentSnapshot {
        self.inner.read().snapshot()
    }

    /// Run a closure with read access to the store
    pub fn read<R>(&self, f: impl FnOnce(&CommentStore) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl From<CommentStore> for SharedCommentStore {
    fn from(store: CommentStore) -> Self {
        Self::new(store)
    }
}
