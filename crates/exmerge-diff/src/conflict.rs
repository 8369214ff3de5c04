//! Conflict sets: the divergent candidate values for one baseline leaf.
//!
//! Each modified tree whose value at a leaf differs from the baseline's
//! current value contributes one [`Candidate`]. Candidates keep the order of
//! the modified-tree list. Values are compared only against the baseline,
//! never against each other, so two derivatives making the same edit both
//! appear here.

use serde::{Deserialize, Serialize};

use exmerge_types::SourceId;

/// One divergent value and the tree it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub source: SourceId,
    pub value: String,
}

impl Candidate {
    pub fn new(source: SourceId, value: impl Into<String>) -> Self {
        Self {
            source,
            value: value.into(),
        }
    }
}

/// Ordered candidates for a single leaf.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictSet {
    candidates: Vec<Candidate>,
}

impl ConflictSet {
    /// Create an empty conflict set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    /// Returns `true` if no modified tree diverged.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Candidate values in modified-tree order.
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.candidates.iter().map(|c| c.value.as_str())
    }

    /// Distinct candidate values in first-seen order.
    pub fn distinct_values(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for candidate in &self.candidates {
            if !seen.contains(&candidate.value.as_str()) {
                seen.push(&candidate.value);
            }
        }
        seen
    }

    /// Keep only the first candidate for each distinct value.
    ///
    /// Agreeing edits from several sources collapse into one candidate, so a
    /// leaf every editor changed the same way no longer needs arbitration.
    pub fn collapse_identical(self) -> Self {
        let mut collapsed = Self::new();
        for candidate in self.candidates {
            if !collapsed.iter().any(|c| c.value == candidate.value) {
                collapsed.push(candidate);
            }
        }
        collapsed
    }
}

impl<'a> IntoIterator for &'a ConflictSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Build the conflict set for one leaf.
///
/// `observed` yields each modified tree's value at the leaf, in
/// modified-tree order. Values equal to `baseline` are dropped.
pub fn collect_conflicts<'a, I>(baseline: &str, observed: I) -> ConflictSet
where
    I: IntoIterator<Item = (&'a SourceId, &'a str)>,
{
    let mut set = ConflictSet::new();
    for (source, value) in observed {
        if value != baseline {
            set.push(Candidate::new(source.clone(), value));
        }
    }
    set
}
