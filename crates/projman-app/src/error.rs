use thiserror::Error;

use crate::merge::MergeError;
use crate::policy::Denied;
use projman_store::StoreError;

/// Errors surfaced by the application core.
///
/// Everything here is recoverable from the caller's point of view; the UI
/// layer turns these into user-visible feedback.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failure in the store layer (open, query, constraint violation).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The acting user is not allowed to perform the operation.
    #[error("permission denied: {0}")]
    Denied(#[from] Denied),

    /// A referenced record does not exist.
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: i64 },

    /// Caller-supplied data failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The document-merge collaborator reported a failure.
    #[error("merge failed: {0}")]
    Merge(#[from] MergeError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
