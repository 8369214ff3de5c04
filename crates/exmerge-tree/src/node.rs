use std::cell::OnceCell;
use std::fmt;

use exmerge_types::KindAttribute;

/// Handle to a node inside one [`AddressableTree`](crate::AddressableTree).
///
/// Ids are arena indices and are only meaningful for the tree that issued
/// them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node of an addressable tree.
///
/// `parent` is a non-owning back-reference into the same arena. `children`
/// lists the nodes this one owns, in document order. The path is computed
/// on first request and cached until the node is re-parented.
#[derive(Clone, Debug)]
pub struct AddressableNode {
    pub(crate) name: Option<String>,
    pub(crate) kind: KindAttribute,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) path: OnceCell<String>,
}

impl AddressableNode {
    pub(crate) fn new(name: Option<String>, kind: KindAttribute, parent: Option<NodeId>) -> Self {
        Self {
            name,
            kind,
            parent,
            children: Vec::new(),
            path: OnceCell::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &KindAttribute {
        &self.kind
    }

    /// The kind attribute's value, if the node carries one.
    pub fn value(&self) -> Option<&str> {
        self.kind.value()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// A leaf has no children and is the unit of merge.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` if the path has already been computed.
    pub fn has_cached_path(&self) -> bool {
        self.path.get().is_some()
    }
}
