//! Error types for the diff crate.

/// Errors that can occur during diff operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// A comparison was requested with neither side present.
    ///
    /// The comparator never produces this for its own recursive calls, so
    /// seeing it means the outer entry point was misused.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
