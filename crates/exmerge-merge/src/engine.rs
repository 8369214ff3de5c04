//! The multi-way leaf merge.
//!
//! [`MergeEngine`] walks the baseline's leaves in pre-order. For each leaf it
//! resolves the same path in every modified tree, collects the values that
//! differ from the baseline's current value into a conflict set, and
//! settles it:
//!
//! - no candidates: the baseline value stays;
//! - one candidate: it is adopted without asking anyone;
//! - two or more: the [`DecisionMaker`] picks one or keeps the baseline.
//!
//! The adopted value is written into the baseline in place. A baseline leaf
//! missing from any modified tree aborts the whole merge. Because
//! [`MergeEngine::merge`] consumes the engine, an aborted merge leaves no
//! partially merged tree behind.

use serde::Serialize;
use tracing::{debug, info, warn};

use exmerge_diff::collect_conflicts;
use exmerge_index::TreeIndex;
use exmerge_tree::{emit, ingest, AddressableTree, NodeId};
use exmerge_types::{ElementNode, SourceId};

use crate::config::MergeConfig;
use crate::decision::{DecisionError, DecisionMaker, DecisionRequest, Resolution};
use crate::error::{MergeError, MergeResult};
use crate::progress::{Progress, ProgressSink};

/// Counts of what happened to each baseline leaf.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Baseline leaves visited.
    pub leaves: usize,
    /// Leaves no modified tree changed.
    pub unchanged: usize,
    /// Leaves changed by exactly one modified tree.
    pub auto_adopted: usize,
    /// Contested leaves where a candidate was selected.
    pub arbitrated: usize,
    /// Contested leaves where the baseline value was kept.
    pub kept_baseline: usize,
    /// Leaves carrying no mergeable value (comments).
    pub skipped: usize,
}

impl MergeReport {
    fn record(&mut self, action: LeafAction) {
        match action {
            LeafAction::Unchanged => self.unchanged += 1,
            LeafAction::AutoAdopted => self.auto_adopted += 1,
            LeafAction::Arbitrated => self.arbitrated += 1,
            LeafAction::KeptBaseline => self.kept_baseline += 1,
            LeafAction::Skipped => self.skipped += 1,
        }
    }

    /// Leaves whose merged value differs from the baseline.
    pub fn changed(&self) -> usize {
        self.auto_adopted + self.arbitrated
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LeafAction {
    Unchanged,
    AutoAdopted,
    Arbitrated,
    KeptBaseline,
    Skipped,
}

/// The result of a successful merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The merged tree, ready for re-encoding.
    pub tree: ElementNode,
    pub report: MergeReport,
}

/// Merges modified trees into a baseline tree.
pub struct MergeEngine {
    baseline: AddressableTree,
    modified: Vec<(SourceId, AddressableTree)>,
    config: MergeConfig,
}

impl MergeEngine {
    /// Create an engine over an already addressable baseline.
    pub fn new(baseline: AddressableTree, config: MergeConfig) -> Self {
        Self {
            baseline,
            modified: Vec::new(),
            config,
        }
    }

    /// Create an engine from a plain element tree.
    pub fn from_element(baseline: &ElementNode, config: MergeConfig) -> Self {
        Self::new(ingest(baseline), config)
    }

    /// Register a modified tree. Candidates are ordered by registration.
    pub fn add_modified(&mut self, source: SourceId, tree: AddressableTree) -> &mut Self {
        self.modified.push((source, tree));
        self
    }

    pub fn add_modified_element(&mut self, source: SourceId, element: &ElementNode) -> &mut Self {
        self.add_modified(source, ingest(element))
    }

    pub fn modified_count(&self) -> usize {
        self.modified.len()
    }

    pub fn baseline(&self) -> &AddressableTree {
        &self.baseline
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Run the merge and emit the merged tree.
    ///
    /// Progress is reported after every baseline leaf. Any error aborts the
    /// merge and the engine, with its partially updated baseline, is dropped.
    pub fn merge(
        mut self,
        decider: &mut dyn DecisionMaker,
        progress: &mut dyn ProgressSink,
    ) -> MergeResult<MergeOutcome> {
        let leaves: Vec<NodeId> = self.baseline.leaves().collect();
        let total = leaves.len();
        let modified_trees = self.modified.len();
        info!(leaves = total, modified_trees, "starting merge");

        let mut report = MergeReport {
            leaves: total,
            ..MergeReport::default()
        };
        for (i, leaf) in leaves.into_iter().enumerate() {
            let action = self.merge_leaf(leaf, decider)?;
            report.record(action);
            progress.on_progress(Progress {
                processed: i + 1,
                total,
                modified_trees,
            });
        }

        let tree = emit(&self.baseline)?;
        info!(
            changed = report.changed(),
            arbitrated = report.arbitrated,
            kept_baseline = report.kept_baseline,
            "merge complete"
        );
        Ok(MergeOutcome { tree, report })
    }

    fn merge_leaf(
        &mut self,
        leaf: NodeId,
        decider: &mut dyn DecisionMaker,
    ) -> MergeResult<LeafAction> {
        let path = self.baseline.path(leaf)?.to_string();

        let mut observed: Vec<(&SourceId, Option<&str>)> = Vec::with_capacity(self.modified.len());
        for (source, tree) in &self.modified {
            let node = TreeIndex::with_mode(tree, self.config.resolve_mode)
                .resolve_node(&path)
                .ok_or_else(|| MergeError::StructuralMismatch {
                    path: path.clone(),
                    modified: source.clone(),
                })?;
            observed.push((source, node.value()));
        }

        let node = &self.baseline[leaf];
        let kind = node.kind();
        let baseline_value = match node.value() {
            Some(value) if node.kind().is_mergeable() => value,
            _ => return Ok(LeafAction::Skipped),
        };

        let mut values = Vec::with_capacity(observed.len());
        for (source, value) in observed {
            let value = value.ok_or_else(|| MergeError::StructuralMismatch {
                path: path.clone(),
                modified: source.clone(),
            })?;
            values.push((source, value));
        }

        let mut conflicts = collect_conflicts(baseline_value, values);
        if self.config.collapse_identical_candidates {
            conflicts = conflicts.collapse_identical();
        }

        let (adopted, action) = match conflicts.len() {
            0 => return Ok(LeafAction::Unchanged),
            1 => {
                let candidate = &conflicts.candidates()[0];
                debug!(%path, source = %candidate.source, value = %candidate.value, "adopting single edit");
                (candidate.value.clone(), LeafAction::AutoAdopted)
            }
            _ => {
                let request = DecisionRequest {
                    path: &path,
                    baseline: baseline_value,
                    kind,
                    candidates: &conflicts,
                    attempt: 1,
                };
                match arbitrate(&self.config, request, decider)? {
                    Resolution::Candidate(index) => {
                        let candidate = &conflicts.candidates()[index];
                        debug!(%path, source = %candidate.source, value = %candidate.value, "arbitrated");
                        (candidate.value.clone(), LeafAction::Arbitrated)
                    }
                    Resolution::KeepBaseline => {
                        debug!(%path, "kept baseline value");
                        return Ok(LeafAction::KeptBaseline);
                    }
                }
            }
        };

        self.baseline.set_value(leaf, adopted);
        Ok(action)
    }
}

/// Ask `decider` until it gives an in-range answer.
///
/// Returned `Resolution::Candidate` indices are always valid for the
/// request's conflict set.
fn arbitrate(
    config: &MergeConfig,
    mut request: DecisionRequest<'_>,
    decider: &mut dyn DecisionMaker,
) -> MergeResult<Resolution> {
    let candidates = request.candidates.len();
    loop {
        match decider.decide(&request) {
            Ok(Resolution::Candidate(index)) if index < candidates => {
                return Ok(Resolution::Candidate(index));
            }
            Ok(Resolution::KeepBaseline) => return Ok(Resolution::KeepBaseline),
            Ok(Resolution::Candidate(index)) => {
                let err = MergeError::InvalidDecision {
                    path: request.path.to_string(),
                    index,
                    candidates,
                };
                if config
                    .max_decision_attempts
                    .is_some_and(|max| request.attempt >= max)
                {
                    return Err(err);
                }
                warn!(error = %err, attempt = request.attempt, "asking again");
                decider.rejected(&request, index);
                request.attempt += 1;
            }
            Err(DecisionError::Cancelled) => {
                return Err(MergeError::Cancelled {
                    path: request.path.to_string(),
                });
            }
        }
    }
}

/// Merge `modified` documents into `baseline` in one call.
pub fn merge_documents(
    baseline: &ElementNode,
    modified: &[(SourceId, ElementNode)],
    config: MergeConfig,
    decider: &mut dyn DecisionMaker,
    progress: &mut dyn ProgressSink,
) -> MergeResult<MergeOutcome> {
    let mut engine = MergeEngine::from_element(baseline, config);
    for (source, element) in modified {
        engine.add_modified_element(source.clone(), element);
    }
    engine.merge(decider, progress)
}
