//! Error types for vidcomments

use thiserror::Error;

/// Main error type for vidcomments
#[derive(Debug, Error)]
pub enum VcError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Comment not found
    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    /// Invalid input (empty content, reply to a reply, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Caller is not allowed to perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A restored collection breaks a record invariant
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported snapshot schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<VcError>,
    },
}

impl VcError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        VcError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check whether this error (or the error it wraps) is a not-found error
    pub fn is_not_found(&self) -> bool {
        match self {
            VcError::CommentNotFound(_) => true,
            VcError::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Check whether this error (or the error it wraps) is a validation error
    pub fn is_validation(&self) -> bool {
        match self {
            VcError::Validation(_) => true,
            VcError::WithContext { source, .. } => source.is_validation(),
            _ => false,
        }
    }
}

impl From<toml::de::Error> for VcError {
    fn from(err: toml::de::Error) -> Self {
        VcError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for VcError {
    fn from(err: toml::ser::Error) -> Self {
        VcError::Toml(err.to_string())
    }
}

/// Result type alias for vidcomments
pub type Result<T> = std::result::Result<T, VcError>;
