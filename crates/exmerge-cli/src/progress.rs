use std::io::Write;

use exmerge_merge::{Progress, ProgressSink};

/// Rewrites a single status line as leaves are processed.
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn on_progress(&mut self, progress: Progress) {
        // Progress output is best effort; a closed terminal must not abort the merge.
        let _ = write!(
            self.out,
            "\rProcessed {} properties (of {}) in {} files.",
            progress.processed, progress.total, progress.modified_trees
        );
        if progress.processed == progress.total {
            let _ = writeln!(self.out);
        }
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_line_until_done() {
        let mut sink = ConsoleProgress::new(Vec::new());
        for processed in 1..=2 {
            sink.on_progress(Progress { processed, total: 2, modified_trees: 3 });
        }
        let text = String::from_utf8(sink.out).unwrap();
        assert_eq!(
            text,
            "\rProcessed 1 properties (of 2) in 3 files.\rProcessed 2 properties (of 2) in 3 files.\n"
        );
    }
}
