//! Assertion tallies reported by a driver.

use serde::{Deserialize, Serialize};

/// Pass/fail counts for the expectations evaluated while one path ran.
///
/// Assertion failures are counted, not raised: a path with failed
/// expectations still completes and reports its tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectationResults {
    /// Number of expectations that held.
    pub expectations_passed: u64,

    /// Number of expectations that did not hold.
    pub expectations_failed: u64,

    /// Detail of the first failure, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl ExpectationResults {
    /// Creates tallies with no failure detail.
    pub fn new(expectations_passed: u64, expectations_failed: u64) -> Self {
        Self {
            expectations_passed,
            expectations_failed,
            failure: None,
        }
    }

    /// Attaches a failure detail.
    pub fn with_failure(mut self, failure: impl Into<String>) -> Self {
        self.failure = Some(failure.into());
        self
    }

    /// True when at least one expectation failed.
    pub fn is_failure(&self) -> bool {
        self.expectations_failed > 0
    }

    /// Adds another set of tallies to this one.
    ///
    /// The first failure detail seen is kept.
    pub fn merge(&mut self, other: &ExpectationResults) {
        self.expectations_passed += other.expectations_passed;
        self.expectations_failed += other.expectations_failed;
        if self.failure.is_none() {
            self.failure = other.failure.clone();
        }
    }
}
