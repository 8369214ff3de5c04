//! The arbitration seam between the merge engine and whoever resolves
//! conflicts.
//!
//! The engine asks a [`DecisionMaker`] only when two or more modified trees
//! diverge from the baseline at the same leaf. The answer either selects a
//! candidate by index or keeps the baseline value.

use exmerge_diff::ConflictSet;
use exmerge_types::KindAttribute;

/// The answer to a [`DecisionRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Adopt the candidate at this index of the conflict set.
    Candidate(usize),
    /// Leave the baseline value in place.
    KeepBaseline,
}

/// Raised by a decision maker that cannot produce an answer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecisionError {
    #[error("decision cancelled")]
    Cancelled,
}

/// Everything a decision maker needs to pick a winner for one leaf.
#[derive(Clone, Copy, Debug)]
pub struct DecisionRequest<'a> {
    /// Path of the contested leaf.
    pub path: &'a str,
    /// The baseline's current value at that leaf.
    pub baseline: &'a str,
    /// The baseline leaf's attribute, for labelling values.
    pub kind: &'a KindAttribute,
    /// Divergent values, in modified-tree order.
    pub candidates: &'a ConflictSet,
    /// 1 on the first ask; incremented each time an answer is rejected.
    pub attempt: u32,
}

/// Resolves conflicts on behalf of the merge engine.
///
/// Implementations may block (for example on user input). Answers that
/// select a candidate outside the conflict set are rejected and the same
/// request is asked again.
pub trait DecisionMaker {
    /// Pick a candidate or keep the baseline value.
    fn decide(&mut self, request: &DecisionRequest<'_>) -> Result<Resolution, DecisionError>;

    /// Called when `answer` was out of range, before the request is repeated.
    fn rejected(&mut self, _request: &DecisionRequest<'_>, _answer: usize) {}
}

impl<F> DecisionMaker for F
where
    F: FnMut(&DecisionRequest<'_>) -> Result<Resolution, DecisionError>,
{
    fn decide(&mut self, request: &DecisionRequest<'_>) -> Result<Resolution, DecisionError> {
        self(request)
    }
}

/// Keeps the baseline value for every contested leaf.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeepBaselineDecider;

impl DecisionMaker for KeepBaselineDecider {
    fn decide(&mut self, _request: &DecisionRequest<'_>) -> Result<Resolution, DecisionError> {
        Ok(Resolution::KeepBaseline)
    }
}
