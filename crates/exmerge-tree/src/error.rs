//! Error types for the tree crate.

use crate::node::NodeId;

/// Errors that can occur while addressing or emitting a tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// A node has neither a name nor a kind attribute. The input tree is
    /// malformed and no path can be built for it.
    #[error("node {node} has neither a name nor a kind attribute")]
    Structural { node: NodeId },

    /// The tree could not be converted back into an element tree.
    #[error("emission failed: {0}")]
    Emission(#[from] EmissionError),

    /// A node cannot be moved under the requested parent.
    #[error("cannot move node {node} under {parent}: {reason}")]
    InvalidReparent {
        node: NodeId,
        parent: NodeId,
        reason: &'static str,
    },
}

/// Reasons an addressable tree cannot be emitted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EmissionError {
    /// The top-level node must be a template container.
    #[error("top-level node is not a template (found {found})")]
    RootNotTemplate { found: String },

    /// A non-root node carries no payload.
    #[error("node at {path} has no payload to emit")]
    MissingPayload { path: String },
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
