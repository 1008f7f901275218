//! Run progress reporting.

use crate::RunSummary;
use derive_getters::Getters;
use fabula_error::{FabulaError, FabulaResult};
use fabula_interface::ExpectationResults;
use fabula_transcript::{Transcript, TranscriptWriter};
use tracing::warn;

/// How a path ended.
#[derive(Debug, Clone)]
pub enum PathOutcome {
    /// Ran to completion with no failed expectation.
    Passed,
    /// Ran to completion with at least one failed expectation.
    Failed,
    /// A hook, step, driver call or panic aborted the path.
    Errored(FabulaError),
    /// Ran cleanly up to a deferred marker.
    Deferred,
}

impl PathOutcome {
    /// True for failed and errored paths.
    pub fn is_failure(&self) -> bool {
        matches!(self, PathOutcome::Failed | PathOutcome::Errored(_))
    }
}

/// Result of one executed path.
#[derive(Debug, Clone, Getters)]
pub struct PathReport {
    /// Story the path belongs to
    story: String,

    /// Path description, suffixed when the path was deferred
    description: String,

    /// How the path ended
    outcome: PathOutcome,

    /// Driver tallies, empty when the path was aborted
    results: ExpectationResults,
}

impl PathReport {
    /// Creates a report.
    pub fn new(
        story: impl Into<String>,
        description: impl Into<String>,
        outcome: PathOutcome,
        results: ExpectationResults,
    ) -> Self {
        Self {
            story: story.into(),
            description: description.into(),
            outcome,
            results,
        }
    }
}

/// Whether a story runs or is only listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryStatus {
    /// Its paths are about to run.
    Running,
    /// It has no specification; nothing runs.
    Deferred,
}

/// Receives run progress in execution order.
///
/// Every method defaults to doing nothing. Errors returned here are logged
/// and counted in [`RunSummary::report_errors`]; they never stop the run.
pub trait RunObserver: Send {
    /// A selected topic is starting.
    fn on_topic(&mut self, _description: &str) -> FabulaResult<()> {
        Ok(())
    }

    /// A selected story is starting, or being skipped as deferred.
    fn on_story(&mut self, _description: &str, _status: StoryStatus) -> FabulaResult<()> {
        Ok(())
    }

    /// A path finished.
    fn on_path(&mut self, _report: &PathReport) -> FabulaResult<()> {
        Ok(())
    }

    /// A topic finished and its transcript is complete.
    fn on_transcript(&mut self, _transcript: &Transcript) -> FabulaResult<()> {
        Ok(())
    }

    /// Every topic finished.
    fn on_finish(&mut self, _summary: &RunSummary) -> FabulaResult<()> {
        Ok(())
    }
}

/// Forwards every event to several observers in registration order.
///
/// Every observer sees every event even when an earlier one fails; the first
/// error is returned.
#[derive(Default)]
pub struct ObserverChain {
    observers: Vec<Box<dyn RunObserver>>,
}

impl ObserverChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an observer, builder style.
    pub fn with(mut self, observer: impl RunObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// True when no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    fn each(
        &mut self,
        mut f: impl FnMut(&mut dyn RunObserver) -> FabulaResult<()>,
    ) -> FabulaResult<()> {
        let mut first = None;
        for observer in &mut self.observers {
            if let Err(e) = f(observer.as_mut()) {
                warn!(error = %e, "Observer failed");
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }
}

impl RunObserver for ObserverChain {
    fn on_topic(&mut self, description: &str) -> FabulaResult<()> {
        self.each(|o| o.on_topic(description))
    }

    fn on_story(&mut self, description: &str, status: StoryStatus) -> FabulaResult<()> {
        self.each(|o| o.on_story(description, status))
    }

    fn on_path(&mut self, report: &PathReport) -> FabulaResult<()> {
        self.each(|o| o.on_path(report))
    }

    fn on_transcript(&mut self, transcript: &Transcript) -> FabulaResult<()> {
        self.each(|o| o.on_transcript(transcript))
    }

    fn on_finish(&mut self, summary: &RunSummary) -> FabulaResult<()> {
        self.each(|o| o.on_finish(summary))
    }
}

impl RunObserver for TranscriptWriter {
    fn on_transcript(&mut self, transcript: &Transcript) -> FabulaResult<()> {
        self.write(transcript)?;
        Ok(())
    }

    fn on_finish(&mut self, _summary: &RunSummary) -> FabulaResult<()> {
        self.write_index()?;
        Ok(())
    }
}
