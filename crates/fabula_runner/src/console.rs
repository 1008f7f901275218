//! Plain-text progress report.

use crate::{PathOutcome, PathReport, RunObserver, RunSummary, StoryStatus};
use fabula_error::{FabulaResult, RunError, RunErrorKind};
use std::io::Write;

/// Width topic headers and the final verdict are right-aligned to.
pub const REPORT_WIDTH: usize = 80;

/// Writes the human-readable run report.
///
/// ```text
///                                                                    Accounts
/// --------------------------------------------------------------------------------
/// sign up
///   ok: register > log in
///   XX: register > log out
///
/// Driver Error: 500 at line 12 in tests/accounts.rs
///
///                                                          Expectations Passed: 9
///                                                                         ALL OK!
/// ```
pub struct ConsoleReporter {
    out: Box<dyn Write + Send>,
}

impl ConsoleReporter {
    /// Reports to `out`.
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    /// Reports to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    fn lines<I, S>(&mut self, lines: I) -> FabulaResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            writeln!(self.out, "{}", line.as_ref()).map_err(write_error)?;
        }
        self.out.flush().map_err(write_error)?;
        Ok(())
    }
}

impl std::fmt::Debug for ConsoleReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleReporter").finish_non_exhaustive()
    }
}

impl RunObserver for ConsoleReporter {
    fn on_topic(&mut self, description: &str) -> FabulaResult<()> {
        self.lines([
            String::new(),
            String::new(),
            right(description),
            "-".repeat(REPORT_WIDTH),
        ])
    }

    fn on_story(&mut self, description: &str, status: StoryStatus) -> FabulaResult<()> {
        match status {
            StoryStatus::Running => self.lines([description]),
            StoryStatus::Deferred => self.lines([description, "  #### deferred ####"]),
        }
    }

    fn on_path(&mut self, report: &PathReport) -> FabulaResult<()> {
        let detail = match report.outcome() {
            PathOutcome::Errored(e) => Some(e.to_string()),
            PathOutcome::Failed => Some(
                report
                    .results()
                    .failure
                    .clone()
                    .unwrap_or_else(|| {
                        format!(
                            "{} expectation(s) failed",
                            report.results().expectations_failed
                        )
                    }),
            ),
            PathOutcome::Passed | PathOutcome::Deferred => None,
        };

        match detail {
            Some(detail) => self.lines([
                format!("  XX: {}", report.description()),
                String::new(),
                detail,
                String::new(),
            ]),
            None if report.description().is_empty() => self.lines(["  ok"]),
            None => self.lines([format!("  ok: {}", report.description())]),
        }
    }

    fn on_finish(&mut self, summary: &RunSummary) -> FabulaResult<()> {
        let totals = &summary.expectations;
        if summary.is_success() {
            self.lines([
                right(&format!("Expectations Passed: {}", totals.expectations_passed)),
                right("ALL OK!"),
            ])
        } else {
            self.lines([
                right(&format!("Expectations Failed: {}", totals.expectations_failed)),
                right("FAILED!"),
            ])
        }
    }
}

fn right(text: &str) -> String {
    format!("{:>width$}", text, width = REPORT_WIDTH)
}

fn write_error(e: std::io::Error) -> fabula_error::FabulaError {
    RunError::new(RunErrorKind::Report(e.to_string())).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_alignment() {
        let line = right("Accounts");
        assert_eq!(line.len(), REPORT_WIDTH);
        assert!(line.ends_with("Accounts"));
        assert!(line.starts_with(' '));
    }
}
