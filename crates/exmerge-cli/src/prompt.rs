//! Interactive conflict resolution on a terminal.

use std::io::{BufRead, Write};

use colored::Colorize;
use exmerge_merge::{DecisionError, DecisionMaker, DecisionRequest, Resolution};
use tracing::warn;

/// Asks the user to pick a value for every contested leaf.
///
/// Answer `0` keeps the baseline value and `n` adopts candidate `n`. `q`
/// or end of input cancels the merge.
pub struct TerminalDecider<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalDecider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn show(&mut self, request: &DecisionRequest<'_>) -> std::io::Result<()> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Multiple files overwrite {}! Would you like to keep the baseline value or one of the edits?",
            request.path.bold()
        )?;
        writeln!(self.output, "Value #0: baseline [{}]", request.kind)?;
        let mut shown = request.kind.clone();
        for (i, candidate) in request.candidates.iter().enumerate() {
            shown.set_value(candidate.value.as_str());
            writeln!(
                self.output,
                "Value #{}: {} [{}]",
                i + 1,
                candidate.source.to_string().cyan(),
                shown
            )?;
        }
        Ok(())
    }

    fn read_answer(&mut self) -> std::io::Result<Option<String>> {
        write!(self.output, "Enter a number and press enter (0 keeps the baseline, q cancels): ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> DecisionMaker for TerminalDecider<R, W> {
    fn decide(&mut self, request: &DecisionRequest<'_>) -> Result<Resolution, DecisionError> {
        if request.attempt == 1 {
            self.show(request).map_err(cancelled)?;
        }
        loop {
            let Some(answer) = self.read_answer().map_err(cancelled)? else {
                return Err(DecisionError::Cancelled);
            };
            if answer.eq_ignore_ascii_case("q") {
                return Err(DecisionError::Cancelled);
            }
            match answer.parse::<usize>() {
                Ok(0) => return Ok(Resolution::KeepBaseline),
                Ok(n) => return Ok(Resolution::Candidate(n - 1)),
                Err(_) => {
                    writeln!(
                        self.output,
                        "{} unable to read {:?} as a number",
                        "error:".red().bold(),
                        answer
                    )
                    .map_err(cancelled)?;
                }
            }
        }
    }

    fn rejected(&mut self, request: &DecisionRequest<'_>, answer: usize) {
        let _ = writeln!(
            self.output,
            "{} value #{} does not exist, pick 0 to {}",
            "error:".red().bold(),
            answer + 1,
            request.candidates.len()
        );
    }
}

fn cancelled(err: std::io::Error) -> DecisionError {
    warn!(error = %err, "terminal unavailable, cancelling merge");
    DecisionError::Cancelled
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use exmerge_diff::{Candidate, ConflictSet};
    use exmerge_types::{KindAttribute, SourceId};

    fn id(s: &str) -> SourceId {
        SourceId::new(s).unwrap()
    }

    fn conflicts() -> ConflictSet {
        let mut set = ConflictSet::new();
        set.push(Candidate::new(id("a.json"), "150"));
        set.push(Candidate::new(id("c.json"), "200"));
        set
    }

    fn request<'a>(set: &'a ConflictSet, kind: &'a KindAttribute, attempt: u32) -> DecisionRequest<'a> {
        DecisionRequest {
            path: "EXML.Stats.Health",
            baseline: kind.value().unwrap_or_default(),
            kind,
            candidates: set,
            attempt,
        }
    }

    fn health() -> KindAttribute {
        KindAttribute::Value("100".into())
    }

    fn decider(input: &str) -> TerminalDecider<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalDecider::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(decider: &TerminalDecider<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&decider.output).into_owned()
    }

    #[test]
    fn picks_candidate_by_number() {
        let set = conflicts();
        let kind = health();
        let mut d = decider("2\n");
        assert_eq!(d.decide(&request(&set, &kind, 1)), Ok(Resolution::Candidate(1)));

        let text = output(&d);
        assert!(text.contains("Value #0: baseline [value=\"100\"]"));
        assert!(text.contains("[value=\"150\"]"));
        assert!(text.contains("Value #2: "));
    }

    #[test]
    fn zero_keeps_baseline() {
        let set = conflicts();
        let kind = health();
        assert_eq!(decider("0\n").decide(&request(&set, &kind, 1)), Ok(Resolution::KeepBaseline));
    }

    #[test]
    fn non_numeric_input_asks_again() {
        let set = conflicts();
        let kind = health();
        let mut d = decider("two\n-1\n 1 \n");
        assert_eq!(d.decide(&request(&set, &kind, 1)), Ok(Resolution::Candidate(0)));
        assert_eq!(output(&d).matches("as a number").count(), 2);
    }

    #[test]
    fn eof_and_quit_cancel() {
        let set = conflicts();
        let kind = health();
        assert_eq!(decider("").decide(&request(&set, &kind, 1)), Err(DecisionError::Cancelled));
        assert_eq!(decider("q\n").decide(&request(&set, &kind, 1)), Err(DecisionError::Cancelled));
    }

    #[test]
    fn labels_values_with_the_leaf_attribute() {
        let set = conflicts();
        let kind = KindAttribute::Template("GcEmpty.xml".into());
        let mut d = decider("0\n");
        assert_eq!(d.decide(&request(&set, &kind, 1)), Ok(Resolution::KeepBaseline));

        let text = output(&d);
        assert!(text.contains("Value #0: baseline [template=\"GcEmpty.xml\"]"));
        assert!(text.contains("[template=\"200\"]"));
        assert!(!text.contains("value=\""));
    }

    #[test]
    fn repeated_request_skips_listing() {
        let set = conflicts();
        let kind = health();
        let mut d = decider("1\n");
        d.rejected(&request(&set, &kind, 1), 6);
        assert_eq!(d.decide(&request(&set, &kind, 2)), Ok(Resolution::Candidate(0)));

        let text = output(&d);
        assert!(text.contains("value #7 does not exist, pick 0 to 2"));
        assert!(!text.contains("Value #0"));
    }
}
