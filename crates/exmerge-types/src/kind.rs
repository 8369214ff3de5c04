//! The typed attribute carried by every element node.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::Payload;
use crate::error::TypeError;

/// Closed tag describing which attribute a node carries.
///
/// Mirrors the three [`Payload`] kinds, plus `None` for nodes built without
/// one. Path construction and re-emission both dispatch on this tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KindAttribute {
    /// Groups children under a named schema (`template="..."`).
    Template(String),
    /// A mergeable leaf value (`value="..."`).
    Value(String),
    /// Non-mergeable metadata (`comment="..."`).
    Comment(String),
    #[default]
    None,
}

impl KindAttribute {
    /// Build a kind from an attribute name and its value.
    pub fn from_attribute(name: &str, value: impl Into<String>) -> Result<Self, TypeError> {
        match name {
            "template" => Ok(Self::Template(value.into())),
            "value" => Ok(Self::Value(value.into())),
            "comment" => Ok(Self::Comment(value.into())),
            other => Err(TypeError::UnknownAttribute(other.to_string())),
        }
    }

    /// The attribute's value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Template(v) | Self::Value(v) | Self::Comment(v) => Some(v),
            Self::None => None,
        }
    }

    /// Replace the attribute's value, keeping its kind.
    ///
    /// Returns `false` (and changes nothing) for `KindAttribute::None`.
    pub fn set_value(&mut self, value: impl Into<String>) -> bool {
        match self {
            Self::Template(v) | Self::Value(v) | Self::Comment(v) => {
                *v = value.into();
                true
            }
            Self::None => false,
        }
    }

    /// The attribute name as it appears in the document format.
    pub fn attribute_name(&self) -> Option<&'static str> {
        match self {
            Self::Template(_) => Some("template"),
            Self::Value(_) => Some("value"),
            Self::Comment(_) => Some("comment"),
            Self::None => None,
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }

    /// Returns `true` for kinds whose value takes part in a merge.
    ///
    /// Comments are metadata and never merged.
    pub fn is_mergeable(&self) -> bool {
        matches!(self, Self::Template(_) | Self::Value(_))
    }
}

impl From<&Payload> for KindAttribute {
    fn from(payload: &Payload) -> Self {
        match payload {
            Payload::Container { template } => Self::Template(template.clone()),
            Payload::Leaf { value } => Self::Value(value.clone()),
            Payload::Annotation { comment } => Self::Comment(comment.clone()),
        }
    }
}

impl fmt::Display for KindAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.attribute_name(), self.value()) {
            (Some(name), Some(value)) => write!(f, "{name}=\"{value}\""),
            _ => f.write_str("<none>"),
        }
    }
}

/// Strip one trailing `.xml` from a container identifier.
pub fn strip_xml_suffix(value: &str) -> &str {
    value.strip_suffix(".xml").unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_attribute_names() {
        assert_eq!(
            KindAttribute::from_attribute("template", "GcStats").unwrap(),
            KindAttribute::Template("GcStats".into())
        );
        assert_eq!(
            KindAttribute::from_attribute("value", "1").unwrap(),
            KindAttribute::Value("1".into())
        );
        assert_eq!(
            KindAttribute::from_attribute("comment", "x").unwrap(),
            KindAttribute::Comment("x".into())
        );
        assert_eq!(
            KindAttribute::from_attribute("colour", "x"),
            Err(TypeError::UnknownAttribute("colour".into()))
        );
    }

    #[test]
    fn set_value_keeps_kind() {
        let mut kind = KindAttribute::Value("100".into());
        assert!(kind.set_value("150"));
        assert_eq!(kind, KindAttribute::Value("150".into()));

        let mut none = KindAttribute::None;
        assert!(!none.set_value("x"));
        assert_eq!(none, KindAttribute::None);
    }

    #[test]
    fn mergeable_kinds() {
        assert!(KindAttribute::Value("a".into()).is_mergeable());
        assert!(KindAttribute::Template("a".into()).is_mergeable());
        assert!(!KindAttribute::Comment("a".into()).is_mergeable());
        assert!(!KindAttribute::None.is_mergeable());
    }

    #[test]
    fn strip_only_trailing_suffix() {
        assert_eq!(strip_xml_suffix("GcStats.xml"), "GcStats");
        assert_eq!(strip_xml_suffix("a.xml.b"), "a.xml.b");
        assert_eq!(strip_xml_suffix("a.xml.xml"), "a.xml");
        assert_eq!(strip_xml_suffix("plain"), "plain");
    }

    #[test]
    fn display_matches_document_attribute() {
        assert_eq!(KindAttribute::Value("100".into()).to_string(), "value=\"100\"");
        assert_eq!(KindAttribute::None.to_string(), "<none>");
    }
}
