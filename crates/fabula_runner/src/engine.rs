//! Per-path execution.

use crate::{PathOutcome, PathReport};
use fabula_core::{Hook, Path, Story, Topic};
use fabula_error::{FabulaResult, RunError, RunErrorKind};
use fabula_interface::{ApiDriver, DriverFactory, ExpectationResults};
use fabula_transcript::TranscriptRecorder;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{debug, instrument, warn};

/// Appended to the description of a path that ended on a deferred marker.
pub const DEFERRED_SUFFIX: &str = " > ### deferred ###";

/// Runs the paths of one topic's stories.
///
/// Holds the hooks that wrap every path: the global pair from the suite and
/// the topic's own pair. Each path runs against a fresh driver.
pub struct PathEngine<'a, F: DriverFactory> {
    factory: &'a F,
    before_each: Option<&'a Hook<F::Driver>>,
    after_each: Option<&'a Hook<F::Driver>>,
    topic: &'a Topic<F::Driver>,
}

impl<'a, F: DriverFactory> PathEngine<'a, F> {
    /// Creates an engine for `topic`.
    pub fn new(
        factory: &'a F,
        before_each: Option<&'a Hook<F::Driver>>,
        after_each: Option<&'a Hook<F::Driver>>,
        topic: &'a Topic<F::Driver>,
    ) -> Self {
        Self {
            factory,
            before_each,
            after_each,
            topic,
        }
    }

    /// Runs one path and reports how it ended.
    ///
    /// Errors and panics from hooks, steps or the driver end this path only;
    /// they are reported with empty expectation results, and the driver is
    /// never asked for results.
    #[instrument(skip_all, fields(story = %story.description(), path = %describe(path)))]
    pub async fn run_path(
        &self,
        story: &Story<F::Driver>,
        path: &Path<F::Driver>,
        recorder: &mut TranscriptRecorder,
    ) -> PathReport {
        let description = describe(path);
        let mut driver = self.factory.driver();

        let executed = AssertUnwindSafe(self.execute(&mut driver, path, recorder))
            .catch_unwind()
            .await;
        recorder.end_path();

        let outcome = match executed {
            Ok(Ok(deferred)) => driver.results().await.map(|results| (deferred, results)),
            Ok(Err(e)) => Err(e),
            Err(payload) => Err(RunError::new(RunErrorKind::Panicked {
                path: description.clone(),
                message: panic_message(payload.as_ref()),
            })
            .into()),
        };

        match outcome {
            Ok((deferred, results)) => {
                let outcome = if results.is_failure() {
                    PathOutcome::Failed
                } else if deferred {
                    PathOutcome::Deferred
                } else {
                    PathOutcome::Passed
                };
                debug!(
                    passed = results.expectations_passed,
                    failed = results.expectations_failed,
                    "Path complete"
                );
                PathReport::new(story.description().clone(), description, outcome, results)
            }
            Err(e) => {
                warn!(error = %e, "Path aborted");
                PathReport::new(
                    story.description().clone(),
                    description,
                    PathOutcome::Errored(e),
                    ExpectationResults::default(),
                )
            }
        }
    }

    /// Hooks then steps then after-hooks. Returns whether the path was
    /// deferred.
    async fn execute(
        &self,
        driver: &mut F::Driver,
        path: &Path<F::Driver>,
        recorder: &mut TranscriptRecorder,
    ) -> FabulaResult<bool> {
        recorder.begin_scratch();
        if let Some(hook) = self.before_each {
            hook.execute(driver).await?;
        }

        recorder.begin_setup();
        driver.wait().await?;
        if let Some(hook) = self.topic.before() {
            driver.scribing_on(recorder.scribe());
            let result = hook.execute(driver).await;
            driver.scribing_off();
            result?;
        }
        recorder.end_scope();

        recorder.begin_path();
        let mut deferred = false;
        for entry in path.entries() {
            let Some(step) = entry.as_step() else {
                deferred = true;
                break;
            };
            recorder.begin_step(step.description(), step.is_fork());
            driver.wait().await?;
            if let Some(action) = step.action() {
                debug!(step = step.description(), "Running step");
                driver.scribing_on(recorder.scribe());
                let result = action.execute(driver).await;
                driver.scribing_off();
                result?;
            }
            recorder.end_scope();
        }

        if let Some(hook) = self.topic.after() {
            hook.execute(driver).await?;
        }
        if let Some(hook) = self.after_each {
            hook.execute(driver).await?;
        }
        Ok(deferred)
    }
}

/// Path description as reported: deferred paths carry [`DEFERRED_SUFFIX`].
fn describe<D>(path: &Path<D>) -> String {
    let mut description = path.description();
    if path.is_deferred() {
        description.push_str(DEFERRED_SUFFIX);
    }
    description
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_from_str() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
    }

    #[test]
    fn test_panic_message_from_string() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
    }

    #[test]
    fn test_panic_message_other() {
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }
}
