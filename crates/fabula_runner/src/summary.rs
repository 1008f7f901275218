//! Run totals.

use crate::{PathOutcome, PathReport};
use fabula_interface::ExpectationResults;

/// Totals over every path executed in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Expectation tallies summed over every path, with the first failure seen
    pub expectations: ExpectationResults,
    /// Paths executed, deferred ones included
    pub paths_run: usize,
    /// Paths that errored or had failed expectations
    pub paths_failed: usize,
    /// Paths that ended on a deferred marker
    pub paths_deferred: usize,
    /// Stories with no specification at all
    pub stories_deferred: usize,
    /// Observer callbacks that returned an error
    pub report_errors: usize,
}

impl RunSummary {
    /// Adds one path's report to the totals.
    pub fn record(&mut self, report: &PathReport) {
        self.paths_run += 1;
        self.expectations.merge(report.results());
        match report.outcome() {
            PathOutcome::Passed => {}
            PathOutcome::Deferred => self.paths_deferred += 1,
            PathOutcome::Failed | PathOutcome::Errored(_) => self.paths_failed += 1,
        }
    }

    /// True when no path failed, no expectation failed and every report
    /// was delivered.
    pub fn is_success(&self) -> bool {
        self.paths_failed == 0 && !self.expectations.is_failure() && self.report_errors == 0
    }
}
