//! Comment system module
//!
//! Handles the comment store, indexing, validation and snapshots.

pub mod builder;
pub mod index;
pub mod model;
pub mod shared;
pub mod snapshot;
pub mod store;
pub mod validator;

pub use builder::CommentBuilder;
pub use index::CommentIndex;
pub use model::*;
pub use shared::SharedCommentStore;
pub use snapshot::{CommentSnapshot, CURRENT_SCHEMA_VERSION};
pub use store::CommentStore;
pub use validator::CommentValidator;
