//! Path resolution for exmerge.
//!
//! A path produced by one tree is resolved against another tree that shares
//! its schema. This is how a merge pairs a baseline leaf with the matching
//! leaf of every derivative.
//!
//! # Key Types
//!
//! - [`TreeIndex`] -- Resolves path strings within one tree
//! - [`ResolveMode`] -- Whether a mid-walk miss stays put or fails at once
//! - [`Segment`] -- One parsed path segment

pub mod resolver;
pub mod segment;

pub use resolver::{ResolveMode, TreeIndex};
pub use segment::{split_path, Segment};
