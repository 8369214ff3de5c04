//! Diff engine for exmerge.
//!
//! Detects where derivatives of a baseline tree diverge from it, one leaf
//! at a time.
//!
//! # Key Types
//!
//! - [`ConflictSet`] / [`Candidate`] -- Divergent values seen for one baseline leaf
//! - [`LeafDiff`] / [`LeafChange`] -- Every leaf value that differs between two trees

pub mod conflict;
pub mod error;
pub mod leaf_diff;

pub use conflict::{collect_conflicts, Candidate, ConflictSet};
pub use error::{DiffError, DiffResult};
pub use leaf_diff::{diff_leaves, LeafChange, LeafDiff};
