//! Conversion between plain element trees and addressable trees.
//!
//! [`ingest`] wraps an [`ElementNode`] graph top-down, wiring parent links as
//! each node is created. [`emit`] rebuilds the plain taxonomy from the
//! arena, dispatching on each node's [`KindAttribute`]. Child order is
//! preserved in both directions.

use exmerge_types::{ElementNode, KindAttribute, Payload};

use crate::error::{EmissionError, TreeResult};
use crate::node::NodeId;
use crate::tree::AddressableTree;

/// Wrap an element tree into addressable form.
pub fn ingest(element: &ElementNode) -> AddressableTree {
    let mut tree =
        AddressableTree::with_root(element.name.clone(), KindAttribute::from(&element.payload));
    let root = tree.root();
    ingest_children(&mut tree, root, &element.children);
    tree
}

fn ingest_children(tree: &mut AddressableTree, parent: NodeId, children: &[ElementNode]) {
    for child in children {
        let id = tree.add_child(parent, child.name.clone(), KindAttribute::from(&child.payload));
        ingest_children(tree, id, &child.children);
    }
}

/// Rebuild a plain element tree from an addressable tree.
///
/// The root must carry a template attribute; anything else is not a valid
/// top-level document.
pub fn emit(tree: &AddressableTree) -> TreeResult<ElementNode> {
    let root = &tree[tree.root()];
    if !root.kind().is_template() {
        return Err(EmissionError::RootNotTemplate {
            found: root.kind().attribute_name().unwrap_or("none").to_string(),
        }
        .into());
    }
    emit_node(tree, tree.root())
}

fn emit_node(tree: &AddressableTree, id: NodeId) -> TreeResult<ElementNode> {
    let node = &tree[id];
    let payload = match node.kind() {
        KindAttribute::Template(template) => Payload::Container {
            template: template.clone(),
        },
        KindAttribute::Value(value) => Payload::Leaf {
            value: value.clone(),
        },
        KindAttribute::Comment(comment) => Payload::Annotation {
            comment: comment.clone(),
        },
        KindAttribute::None => {
            let path = tree.path(id)?.to_string();
            return Err(EmissionError::MissingPayload { path }.into());
        }
    };

    let children = node
        .children()
        .iter()
        .map(|child| emit_node(tree, *child))
        .collect::<TreeResult<Vec<_>>>()?;

    Ok(ElementNode {
        name: node.name().map(str::to_string),
        payload,
        children,
    })
}
