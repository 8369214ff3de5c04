use exmerge_tree::{AddressableNode, CONTAINER_PREFIX};
use exmerge_types::strip_xml_suffix;

/// One dot-separated component of a node path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Matches a child by name.
    Named(&'a str),
    /// `DataContainer[X]`: matches a child whose attribute value, without a
    /// trailing `.xml`, equals `X`.
    Container(&'a str),
}

/// Split a path into its raw segments.
///
/// Dots inside `[...]` belong to the enclosing segment, so a container whose
/// attribute value contains a dot stays one segment.
pub fn split_path(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in path.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                segments.push(&path[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&path[start..]);
    segments
}

impl<'a> Segment<'a> {
    pub fn parse(raw: &'a str) -> Self {
        match raw
            .strip_prefix(CONTAINER_PREFIX)
            .and_then(|rest| rest.strip_suffix(']'))
        {
            Some(inner) => Self::Container(inner),
            None => Self::Named(raw),
        }
    }

    /// Returns `true` if `node` is what this segment names.
    pub fn matches(&self, node: &AddressableNode) -> bool {
        match self {
            Self::Named(name) => node.name() == Some(*name),
            Self::Container(value) => node
                .value()
                .is_some_and(|v| strip_xml_suffix(v) == *value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_container_segments() {
        assert_eq!(Segment::parse("DataContainer[GcReward]"), Segment::Container("GcReward"));
        assert_eq!(Segment::parse("DataContainer[]"), Segment::Container(""));
    }

    #[test]
    fn split_keeps_bracketed_dots() {
        assert_eq!(
            split_path("EXML.DataContainer[Gc.Stats].Health"),
            vec!["EXML", "DataContainer[Gc.Stats]", "Health"]
        );
        assert_eq!(split_path("EXML.Stats.Health"), vec!["EXML", "Stats", "Health"]);
        assert_eq!(split_path("EXML"), vec!["EXML"]);
    }

    #[test]
    fn everything_else_is_named() {
        assert_eq!(Segment::parse("Health"), Segment::Named("Health"));
        assert_eq!(Segment::parse("DataContainer[open"), Segment::Named("DataContainer[open"));
        assert_eq!(Segment::parse("EXML"), Segment::Named("EXML"));
    }
}
