//! Addressable element trees for exmerge.
//!
//! Wraps the plain [`ElementNode`](exmerge_types::ElementNode) taxonomy in an
//! arena-backed tree whose nodes know their parent and can produce a stable,
//! human-readable path. Paths are the cross-tree identity a merge uses to
//! find corresponding nodes in different derivatives of one baseline.
//!
//! # Key Types
//!
//! - [`AddressableTree`] -- Arena of nodes with a single root
//! - [`AddressableNode`] / [`NodeId`] -- One node and its typed handle
//! - [`ingest`] / [`emit`] -- Conversion from and back to `ElementNode`
//!
//! # Path Format
//!
//! Segments are joined root-first with `.`. A named node contributes its
//! name. An unnamed root template contributes `EXML`. Any other unnamed node
//! contributes `DataContainer[<attribute value without .xml>]`.

pub mod error;
pub mod node;
pub mod serializer;
pub mod tree;

pub use error::{EmissionError, TreeError, TreeResult};
pub use node::{AddressableNode, NodeId};
pub use serializer::{emit, ingest};
pub use tree::{AddressableTree, Descendants, CONTAINER_PREFIX, ROOT_SEGMENT};
