//! The plain element tree exchanged with codecs.
//!
//! An [`ElementNode`] has an optional name, ordered children, and exactly
//! one [`Payload`]. It carries no parent links; see `exmerge-tree` for the
//! addressable form used during a merge.

use serde::{Deserialize, Serialize};

/// The kind-specific payload of an element node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Payload {
    /// Groups children under a named schema.
    Container { template: String },
    /// The mergeable unit.
    Leaf { value: String },
    /// Non-mergeable metadata.
    Annotation { comment: String },
}

/// A node of the element tree as produced by a codec.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub payload: Payload,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    /// Create an unnamed node with the given payload and no children.
    pub fn new(payload: Payload) -> Self {
        Self {
            name: None,
            payload,
            children: Vec::new(),
        }
    }

    /// An unnamed container node.
    pub fn container(template: impl Into<String>) -> Self {
        Self::new(Payload::Container {
            template: template.into(),
        })
    }

    /// A named leaf node.
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(Payload::Leaf {
            value: value.into(),
        })
        .named(name)
    }

    /// A named annotation node.
    pub fn annotation(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::new(Payload::Annotation {
            comment: comment.into(),
        })
        .named(name)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ElementNode::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ElementNode {
        ElementNode::container("GcPlayerStats.xml")
            .with_child(
                ElementNode::container("GcStats.xml")
                    .named("Stats")
                    .with_child(ElementNode::leaf("Health", "100"))
                    .with_child(ElementNode::leaf("Shield", "50")),
            )
            .with_child(ElementNode::annotation("Note", "generated"))
    }

    #[test]
    fn builders_preserve_order() {
        let doc = sample();
        assert_eq!(doc.count(), 5);
        let stats = &doc.children[0];
        assert_eq!(stats.name.as_deref(), Some("Stats"));
        assert_eq!(stats.children[0].name.as_deref(), Some("Health"));
        assert_eq!(stats.children[1].name.as_deref(), Some("Shield"));
    }

    #[test]
    fn json_shape_is_flat() {
        let leaf = ElementNode::leaf("Health", "100");
        let json = serde_json::to_value(&leaf).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Health", "kind": "leaf", "value": "100"})
        );
    }

    #[test]
    fn json_document_survives_serde() {
        let doc = sample();
        let text = serde_json::to_string(&doc).unwrap();
        let back: ElementNode = serde_json::from_str(&text).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<ElementNode, _> =
            serde_json::from_str(r#"{"name":"x","kind":"blob","data":"1"}"#);
        assert!(result.is_err());
    }
}
