//! Error types for the diff crate.

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// A baseline path has no counterpart in the compared tree.
    #[error("path {path} not found in the compared tree")]
    Unresolved { path: String },

    /// The baseline tree itself is malformed.
    #[error("tree error: {0}")]
    Tree(#[from] exmerge_tree::TreeError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
