//! Configuration management for vidcomments

use crate::comment::SortBy;
use crate::error::{Result, VcError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum comment length (default)
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 2000;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comment settings
    pub comments: CommentsConfig,
    /// Listing settings
    pub listing: ListingConfig,
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Failed to load {}", path.display())))
    }

    /// Render as pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.comments.max_content_length == 0 {
            return Err(VcError::Config(
                "comments.max_content_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Comment-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Maximum comment content length, in characters
    pub max_content_length: usize,
    /// What happens to replies when their parent is deleted
    pub delete_policy: DeletePolicy,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            delete_policy: DeletePolicy::default(),
        }
    }
}

/// Listing-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Sort order used when the caller does not pick one
    pub default_sort: SortBy,
    /// Populate replies by default
    pub show_replies: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_sort: SortBy::Newest,
            show_replies: true,
        }
    }
}

/// Treatment of replies when a top-level comment is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Replies are deleted with their parent
    #[default]
    Cascade,
    /// Replies lose their parent and become top-level comments
    Promote,
}
