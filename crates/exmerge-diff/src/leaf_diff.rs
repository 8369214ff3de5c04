//! Leaf-level diff: every leaf value that differs between a baseline tree
//! and one derivative.
//!
//! Leaves are paired by path. A baseline leaf whose path cannot be resolved
//! in the derivative is an error, since structural edits are not diffed.

use exmerge_index::{ResolveMode, TreeIndex};
use exmerge_tree::AddressableTree;
use serde::Serialize;

use crate::error::{DiffError, DiffResult};

/// The result of comparing the leaves of two trees.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LeafDiff {
    /// Changed leaves in baseline pre-order.
    pub changes: Vec<LeafChange>,
    /// Number of baseline leaves compared.
    pub compared: usize,
}

impl LeafDiff {
    /// Returns `true` if no leaf value differs.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changed leaves.
    pub fn len(&self) -> usize {
        self.changes.len()
    }
}

/// A single leaf whose value differs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeafChange {
    pub path: String,
    pub old: String,
    pub new: String,
}

/// Compare every baseline leaf with the leaf at the same path in `modified`.
///
/// Leaves without an attribute value on either side are skipped.
pub fn diff_leaves(
    baseline: &AddressableTree,
    modified: &AddressableTree,
    mode: ResolveMode,
) -> DiffResult<LeafDiff> {
    let index = TreeIndex::with_mode(modified, mode);
    let mut diff = LeafDiff::default();

    for leaf in baseline.leaves() {
        let path = baseline.path(leaf)?;
        let other = index
            .resolve_node(path)
            .ok_or_else(|| DiffError::Unresolved {
                path: path.to_string(),
            })?;
        diff.compared += 1;

        if let (Some(old), Some(new)) = (baseline[leaf].value(), other.value()) {
            if old != new {
                diff.changes.push(LeafChange {
                    path: path.to_string(),
                    old: old.to_string(),
                    new: new.to_string(),
                });
            }
        }
    }

    Ok(diff)
}
