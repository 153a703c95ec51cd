//! Error types for the mark crate.

use hierdiff_diff::DiffError;

/// Errors that can occur while loading hierarchies or marking them.
#[derive(Debug, thiserror::Error)]
pub enum MarkError {
    /// The mark configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A hierarchy exceeded a configured size limit.
    #[error("{limit} of {value} exceeded at '{path}'")]
    LimitExceeded {
        limit: &'static str,
        value: usize,
        path: String,
    },

    /// Reading a document or configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A hierarchy document is not valid JSON or has the wrong shape.
    #[error("invalid hierarchy document: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration file is not valid TOML.
    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// The comparator rejected its input.
    #[error("diff error: {0}")]
    Diff(#[from] DiffError),
}

/// Convenience alias for mark results.
pub type MarkResult<T> = Result<T, MarkError>;
