//! On-disk document formats.

use std::fs;
use std::path::Path;

use anyhow::Context;
use exmerge_types::ElementNode;

/// Reads and writes element trees in one concrete file format.
pub trait Codec {
    /// File extension of documents this codec writes, without the dot.
    fn extension(&self) -> &'static str;

    fn decode(&self, bytes: &[u8]) -> anyhow::Result<ElementNode>;

    fn encode(&self, element: &ElementNode) -> anyhow::Result<Vec<u8>>;
}

/// JSON documents, as produced by the serde form of [`ElementNode`].
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Codec for JsonCodec {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> anyhow::Result<ElementNode> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn encode(&self, element: &ElementNode) -> anyhow::Result<Vec<u8>> {
        let mut bytes = if self.pretty {
            serde_json::to_vec_pretty(element)?
        } else {
            serde_json::to_vec(element)?
        };
        bytes.push(b'\n');
        Ok(bytes)
    }
}

pub fn load(codec: &dyn Codec, path: &Path) -> anyhow::Result<ElementNode> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    codec
        .decode(&bytes)
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub fn save(codec: &dyn Codec, path: &Path, element: &ElementNode) -> anyhow::Result<()> {
    let bytes = codec.encode(element)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> ElementNode {
        ElementNode::container("GcPlayer.xml").with_child(
            ElementNode::container("GcStats.xml")
                .named("Stats")
                .with_child(ElementNode::leaf("Health", "100")),
        )
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("player.json");
        let codec = JsonCodec::new(true);

        save(&codec, &path, &doc()).unwrap();
        assert_eq!(load(&codec, &path).unwrap(), doc());
    }

    #[test]
    fn compact_output_is_single_line() {
        let bytes = JsonCodec::new(false).encode(&doc()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn load_reports_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, b"{\"kind\": \"nonsense\"}").unwrap();

        let err = load(&JsonCodec::default(), &path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&JsonCodec::default(), &dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
