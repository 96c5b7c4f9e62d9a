//! Versioned export and validated restore of a comment store

use super::model::Comment;
use super::store::CommentStore;
use crate::config::CommentsConfig;
use crate::error::{Result, VcError};
use crate::types::CommentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Current snapshot schema version
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// Serializable image of a comment store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnapshot {
    /// Schema version of this snapshot
    pub schema_version: String,
    /// When the snapshot was taken
    pub exported_at: DateTime<Utc>,
    /// Every stored comment, in creation order, without replies populated
    pub comments: Vec<Comment>,
}

impl CommentSnapshot {
    /// Create a snapshot of the given comments at the current schema version
    pub fn new(comments: Vec<Comment>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            comments,
        }
    }

    /// Parse a snapshot from JSON
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            VcError::from(e).with_context(format!("Failed to open {}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Write the snapshot as pretty JSON
    pub fn to_writer(&self, mut writer: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Check whether the schema version can be restored
    pub fn is_supported(&self) -> bool {
        let major = |v: &str| v.split('.').next().map(str::to_string);
        major(&self.schema_version) == major(CURRENT_SCHEMA_VERSION)
    }
}

impl CommentStore {
    /// Export every stored comment
    pub fn snapshot(&self) -> CommentSnapshot {
        CommentSnapshot::new(self.all_sorted().into_iter().cloned().collect())
    }

    /// Rebuild a store from a snapshot, rejecting any broken invariant
    pub fn restore(snapshot: CommentSnapshot, config: &CommentsConfig) -> Result<Self> {
        if !snapshot.is_supported() {
            warn!("Rejected snapshot with schema {}", snapshot.schema_version);
            return Err(VcError::UnsupportedSchemaVersion(snapshot.schema_version));
        }

        let mut store = CommentStore::with_config(config);

        let mut by_id: HashMap<&CommentId, &Comment> =
            HashMap::with_capacity(snapshot.comments.len());
        for comment in &snapshot.comments {
            store.validator().validate_record(comment).map_err(|e| {
                warn!("Rejected snapshot: {}", e);
                e
            })?;
            if by_id.insert(&comment.id, comment).is_some() {
                return Err(VcError::Integrity(format!(
                    "Duplicate comment id {}",
                    comment.id
                )));
            }
        }

        for comment in &snapshot.comments {
            let parent = comment.parent_id.as_ref().and_then(|id| by_id.get(id).copied());
            store.validator().validate_parent(comment, parent).map_err(|e| {
                warn!("Rejected snapshot: {}", e);
                e
            })?;
        }
        drop(by_id);

        // Stable sort keeps the snapshot order for equal timestamps
        let mut comments = snapshot.comments;
        comments.sort_by_key(|comment| comment.timestamp);
        let count = comments.len();
        for comment in comments {
            store.insert(comment);
        }

        info!(
            "Restored {} comments across {} videos",
            count,
            store.videos().len()
        );
        Ok(store)
    }
}
