use serde::{Deserialize, Serialize};

use exmerge_index::ResolveMode;

/// Configuration for a merge run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// How paths are resolved in the modified trees.
    pub resolve_mode: ResolveMode,
    /// When `true`, derivatives that changed a leaf to the same value count
    /// as one candidate. Off by default: every divergent derivative is a
    /// separate candidate, even when several agree.
    pub collapse_identical_candidates: bool,
    /// How many times one decision may be asked before an out-of-range
    /// answer fails the merge. `None` asks until a valid answer arrives.
    pub max_decision_attempts: Option<u32>,
}
