/// Progress after one baseline leaf has been decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Leaves processed so far, including the current one.
    pub processed: usize,
    /// Total leaves in the baseline.
    pub total: usize,
    /// Number of modified trees being merged.
    pub modified_trees: usize,
}

/// Observes merge progress. Has no influence on the merge itself.
pub trait ProgressSink {
    fn on_progress(&mut self, progress: Progress);
}

impl<F> ProgressSink for F
where
    F: FnMut(Progress),
{
    fn on_progress(&mut self, progress: Progress) {
        self(progress)
    }
}

/// Discards all progress reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _progress: Progress) {}
}
