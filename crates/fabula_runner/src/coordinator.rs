//! Runs every selected topic in order.

use crate::{PathEngine, RunObserver, RunOptions, RunSummary, StoryStatus};
use fabula_core::{Story, Suite};
use fabula_error::FabulaResult;
use fabula_interface::DriverFactory;
use fabula_transcript::TranscriptRecorder;
use tracing::{debug, error, info, instrument};

/// Runs the selected topics, stories and paths of `suite`.
///
/// Topics, stories and paths run strictly one after another. A topic whose
/// selected story list is empty is skipped without any report. Stories with
/// no specification are reported as deferred and run nothing, hooks
/// included. Each topic's transcript is handed to the observer once all of
/// its stories have run.
///
/// # Example
///
/// ```rust,ignore
/// let mut reporter = ConsoleReporter::stdout();
/// let factory = || HttpDriver::new(endpoint);
/// let summary = run_topics(&suite, &factory, &RunOptions::default(), &mut reporter).await;
/// assert!(summary.is_success());
/// ```
#[instrument(skip_all, fields(topics = suite.topics().len()))]
pub async fn run_topics<F: DriverFactory>(
    suite: &Suite<F::Driver>,
    factory: &F,
    options: &RunOptions,
    observer: &mut dyn RunObserver,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for topic in suite.topics() {
        if !options.selects_topic(topic.description()) {
            debug!(topic = %topic.description(), "Topic not selected");
            continue;
        }
        let stories: Vec<&Story<F::Driver>> = topic
            .stories()
            .iter()
            .filter(|story| options.selects_story(story.description()))
            .collect();
        if stories.is_empty() {
            debug!(topic = %topic.description(), "No selected stories, skipping topic");
            continue;
        }

        info!(topic = %topic.description(), stories = stories.len(), "Running topic");
        report(&mut summary, observer.on_topic(topic.description()));

        let engine = PathEngine::new(
            factory,
            suite.before_each_hook(),
            suite.after_each_hook(),
            topic,
        );
        let mut recorder = TranscriptRecorder::new(topic.description());

        for story in stories {
            if story.is_deferred() {
                info!(story = %story.description(), "Story deferred");
                summary.stories_deferred += 1;
                report(
                    &mut summary,
                    observer.on_story(story.description(), StoryStatus::Deferred),
                );
                continue;
            }

            info!(story = %story.description(), "Running story");
            report(
                &mut summary,
                observer.on_story(story.description(), StoryStatus::Running),
            );
            recorder.begin_story(story.description().clone());

            for path in story.paths() {
                if !options.selects_path(&path.description()) {
                    continue;
                }
                let path_report = engine.run_path(story, &path, &mut recorder).await;
                summary.record(&path_report);
                report(&mut summary, observer.on_path(&path_report));
            }

            recorder.end_story();
        }

        let transcript = recorder.finish();
        report(&mut summary, observer.on_transcript(&transcript));
    }

    info!(
        passed = summary.expectations.expectations_passed,
        failed = summary.expectations.expectations_failed,
        paths = summary.paths_run,
        "Run complete"
    );
    let finished = observer.on_finish(&summary);
    report(&mut summary, finished);
    summary
}

fn report(summary: &mut RunSummary, result: FabulaResult<()>) {
    if let Err(e) = result {
        error!(error = %e, "Run observer failed");
        summary.report_errors += 1;
    }
}
