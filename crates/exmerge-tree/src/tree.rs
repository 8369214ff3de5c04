//! The arena-backed addressable tree and its path construction.
//!
//! [`AddressableTree`] owns every node in a `Vec`. Parent links are plain
//! [`NodeId`]s into the same arena, so upward walks need no reference
//! counting and the ownership graph stays acyclic.
//!
//! # Invariants
//!
//! - Exactly one node (the root) has no parent.
//! - Every child id listed by a node points back to that node as parent.
//! - A cached path is dropped whenever the node or one of its ancestors is
//!   moved under a different parent, or an unnamed one among them changes
//!   its value.

use std::ops::Index;

use exmerge_types::{strip_xml_suffix, KindAttribute};
use tracing::debug;

use crate::error::{TreeError, TreeResult};
use crate::node::{AddressableNode, NodeId};

/// Segment emitted for an unnamed top-level template.
pub const ROOT_SEGMENT: &str = "EXML";

/// Prefix of the segment emitted for unnamed, attributed nodes.
pub const CONTAINER_PREFIX: &str = "DataContainer[";

/// A tree of [`AddressableNode`]s with a single root.
#[derive(Clone, Debug)]
pub struct AddressableTree {
    nodes: Vec<AddressableNode>,
    root: NodeId,
}

impl AddressableTree {
    /// Create a tree holding only a root node.
    pub fn with_root(name: Option<String>, kind: KindAttribute) -> Self {
        Self {
            nodes: vec![AddressableNode::new(name, kind, None)],
            root: NodeId(0),
        }
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&AddressableNode> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Append a child under `parent`, returning its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not issued by this tree.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: Option<String>,
        kind: KindAttribute,
    ) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "parent {parent} is not in this tree");
        let id = NodeId(self.nodes.len());
        self.nodes.push(AddressableNode::new(name, kind, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Rewrite the kind attribute value of a node in place.
    ///
    /// An unnamed node is addressed by its value, so its cached path and
    /// those of its descendants are dropped. Returns `false` if the node
    /// does not exist or carries no attribute.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return false;
        };
        if !node.kind.set_value(value) {
            return false;
        }
        if node.name.is_none() {
            self.invalidate_paths(id);
        }
        true
    }

    /// Move `node` to the end of `parent`'s children.
    ///
    /// Cached paths of `node` and all of its descendants are invalidated.
    /// The root cannot be moved, and a node cannot become a descendant of
    /// itself.
    pub fn set_parent(&mut self, node: NodeId, parent: NodeId) -> TreeResult<()> {
        let invalid = |reason| TreeError::InvalidReparent { node, parent, reason };

        if node.0 >= self.nodes.len() || parent.0 >= self.nodes.len() {
            return Err(invalid("unknown node"));
        }
        if node == self.root {
            return Err(invalid("the root cannot be moved"));
        }
        if node == parent || self.descendants(node).any(|d| d == parent) {
            return Err(invalid("a node cannot be moved under its own subtree"));
        }

        if let Some(old) = self.nodes[node.0].parent {
            self.nodes[old.0].children.retain(|c| *c != node);
        }
        self.nodes[parent.0].children.push(node);
        self.nodes[node.0].parent = Some(parent);

        self.invalidate_paths(node);
        debug!(%node, %parent, "re-parented node");
        Ok(())
    }

    /// Drop the cached paths of `id` and every node below it.
    fn invalidate_paths(&mut self, id: NodeId) {
        let mut stale: Vec<NodeId> = self.descendants(id).collect();
        stale.push(id);
        for id in stale {
            self.nodes[id.0].path.take();
        }
    }

    // ---------------------------------------------------------------
    // Traversal
    // ---------------------------------------------------------------

    /// All descendants of `id` in pre-order depth-first order, excluding
    /// `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Every leaf below the root, in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(self.root)
            .filter(move |id| self.nodes[id.0].is_leaf())
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    // ---------------------------------------------------------------
    // Paths
    // ---------------------------------------------------------------

    /// The single path segment contributed by `id`.
    pub fn segment(&self, id: NodeId) -> TreeResult<String> {
        let node = &self[id];
        if let Some(name) = &node.name {
            return Ok(name.clone());
        }
        if node.kind.is_template() && node.parent.is_none() {
            return Ok(ROOT_SEGMENT.to_string());
        }
        match node.kind.value() {
            Some(value) => Ok(format!("{CONTAINER_PREFIX}{}]", strip_xml_suffix(value))),
            None => Err(TreeError::Structural { node: id }),
        }
    }

    /// The dot-joined, root-first path of `id`.
    ///
    /// Computed on first request and cached on the node.
    pub fn path(&self, id: NodeId) -> TreeResult<&str> {
        let node = &self[id];
        if let Some(cached) = node.path.get() {
            return Ok(cached.as_str());
        }

        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            segments.push(self.segment(current)?);
            cursor = self.nodes[current.0].parent;
        }
        segments.reverse();
        let path = segments.join(".");

        Ok(node.path.get_or_init(|| path).as_str())
    }
}

impl Index<NodeId> for AddressableTree {
    type Output = AddressableNode;

    fn index(&self, id: NodeId) -> &AddressableNode {
        &self.nodes[id.0]
    }
}

/// Pre-order iterator returned by [`AddressableTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a AddressableTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.nodes[id.0].children.iter().rev().copied());
        Some(id)
    }
}
