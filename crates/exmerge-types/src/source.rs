use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifies one modified tree in a merge, usually the file it came from.
///
/// Candidates in a conflict carry the `SourceId` of the tree that produced
/// them so a decision collaborator can tell the derivatives apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceId(String);

impl SourceId {
    /// Create a source identifier, rejecting empty strings.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::EmptySource);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for SourceId {
    type Error = TypeError;

    fn try_from(s: &str) -> Result<Self, TypeError> {
        Self::new(s)
    }
}

impl TryFrom<String> for SourceId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, TypeError> {
        Self::new(s)
    }
}

impl From<SourceId> for String {
    fn from(id: SourceId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert_eq!(SourceId::new(""), Err(TypeError::EmptySource));
    }

    #[test]
    fn conversions_share_the_empty_check() {
        assert_eq!(SourceId::try_from(""), Err(TypeError::EmptySource));
        assert_eq!(SourceId::try_from(String::new()), Err(TypeError::EmptySource));
        assert_eq!(SourceId::try_from("a.json").unwrap().as_str(), "a.json");
    }

    #[test]
    fn deserializing_rejects_empty() {
        assert!(serde_json::from_str::<SourceId>("\"\"").is_err());
        let id: SourceId = serde_json::from_str("\"a.json\"").unwrap();
        assert_eq!(id.as_str(), "a.json");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a.json\"");
    }

    #[test]
    fn displays_inner_string() {
        let id = SourceId::new("mods/a.json").unwrap();
        assert_eq!(id.to_string(), "mods/a.json");
        assert_eq!(id.as_str(), "mods/a.json");
    }
}
