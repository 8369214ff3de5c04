//! Foundation types for exmerge.
//!
//! This crate provides the codec-facing element tree and the small value
//! types shared by every other exmerge crate.
//!
//! # Key Types
//!
//! - [`ElementNode`] / [`Payload`] -- The plain element tree a codec produces and consumes
//! - [`KindAttribute`] -- Closed tag for a node's typed attribute (template, value, comment)
//! - [`SourceId`] -- Names one modified tree taking part in a merge

pub mod element;
pub mod error;
pub mod kind;
pub mod source;

pub use element::{ElementNode, Payload};
pub use error::TypeError;
pub use kind::{strip_xml_suffix, KindAttribute};
pub use source::SourceId;
