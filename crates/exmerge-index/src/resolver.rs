//! Segment-by-segment resolution of node paths.
//!
//! The first segment names the root and is skipped; the root is never
//! resolved through a path. Each following segment selects the first child
//! of the current node that it matches. After the walk, the node reached
//! must match the final segment, otherwise resolution has lost its way and
//! reports nothing.

use exmerge_tree::{AddressableNode, AddressableTree, NodeId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::segment::{split_path, Segment};

/// What to do when a segment matches no child mid-walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMode {
    /// Stay on the current node and keep walking; the final check decides.
    #[default]
    Lenient,
    /// Report not-found as soon as a segment misses.
    Strict,
}

/// Resolves path strings to nodes within one tree.
#[derive(Clone, Copy, Debug)]
pub struct TreeIndex<'t> {
    tree: &'t AddressableTree,
    mode: ResolveMode,
}

impl<'t> TreeIndex<'t> {
    /// Index `tree` with lenient resolution.
    pub fn new(tree: &'t AddressableTree) -> Self {
        Self::with_mode(tree, ResolveMode::default())
    }

    pub fn with_mode(tree: &'t AddressableTree, mode: ResolveMode) -> Self {
        Self { tree, mode }
    }

    pub fn tree(&self) -> &'t AddressableTree {
        self.tree
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// Resolve `path` to a node id, or `None` if it cannot be found.
    ///
    /// A path must have at least two segments; a bare root segment resolves
    /// to nothing.
    pub fn resolve(&self, path: &str) -> Option<NodeId> {
        let segments: Vec<Segment<'_>> =
            split_path(path).into_iter().skip(1).map(Segment::parse).collect();
        let last = *segments.last()?;

        let tree = self.tree;
        let mut current = tree.root();
        for segment in &segments {
            let found = tree
                .children(current)
                .iter()
                .copied()
                .find(|child| segment.matches(&tree[*child]));
            match found {
                Some(child) => current = child,
                None if self.mode == ResolveMode::Strict => {
                    debug!(path, ?segment, "path segment not found");
                    return None;
                }
                None => {}
            }
        }

        if last.matches(&tree[current]) {
            Some(current)
        } else {
            warn!(
                path,
                last_node = tree[current].name().unwrap_or("<unnamed>"),
                "unable to find node from path"
            );
            None
        }
    }

    /// Resolve `path` and borrow the node it names.
    pub fn resolve_node(&self, path: &str) -> Option<&'t AddressableNode> {
        self.resolve(path).map(|id| &self.tree[id])
    }
}
