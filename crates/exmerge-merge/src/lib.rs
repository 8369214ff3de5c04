//! Merge engine for exmerge.
//!
//! Merges any number of modified trees back into the baseline they were
//! derived from. Every baseline leaf is paired by path with the matching
//! leaf of each derivative; a value changed by exactly one derivative is
//! adopted automatically, and a value changed by several is handed to a
//! [`DecisionMaker`].
//!
//! # Key Types
//!
//! - [`MergeEngine`] -- Holds the baseline and derivatives and runs the merge
//! - [`DecisionMaker`] / [`DecisionRequest`] / [`Resolution`] -- Arbitration seam
//! - [`ProgressSink`] / [`Progress`] -- Per-leaf progress reporting
//! - [`MergeConfig`] -- Resolution mode and conflict handling options
//! - [`MergeOutcome`] / [`MergeReport`] -- The merged tree and what happened

pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod progress;

pub use config::MergeConfig;
pub use decision::{DecisionError, DecisionMaker, DecisionRequest, KeepBaselineDecider, Resolution};
pub use engine::{merge_documents, MergeEngine, MergeOutcome, MergeReport};
pub use error::{MergeError, MergeResult};
pub use progress::{NoProgress, Progress, ProgressSink};
