//! Error types for the merge crate.

use exmerge_tree::TreeError;
use exmerge_types::SourceId;

/// Errors that abort a merge. No merged tree is produced for any of them.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MergeError {
    /// A tree is malformed, or the merged tree cannot be emitted.
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// A baseline leaf has no counterpart in a modified tree.
    #[error("could not locate {path} in {modified}; do all inputs derive from the same baseline?")]
    StructuralMismatch { path: String, modified: SourceId },

    /// The decision collaborator kept answering with a candidate that does
    /// not exist.
    #[error("decision for {path} selected candidate {index}, but only {candidates} exist")]
    InvalidDecision {
        path: String,
        index: usize,
        candidates: usize,
    },

    /// A pending decision was cancelled.
    #[error("merge cancelled while deciding {path}")]
    Cancelled { path: String },
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
