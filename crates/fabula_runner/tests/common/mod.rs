//! Shared mock driver for runner tests.

#![allow(dead_code)]

use async_trait::async_trait;
use fabula_core::{Steps, step};
use fabula_error::{DriverError, FabulaError, FabulaResult};
use fabula_interface::{ApiDriver, ExpectationResults, ResponseSnapshot, Scribe};
use fabula_runner::{PathReport, RunObserver, RunSummary, StoryStatus};
use fabula_transcript::Transcript;
use serde_json::json;
use std::sync::{Arc, Mutex};

pub type EventLog = Arc<Mutex<Vec<String>>>;

/// Driver that logs every call and counts expectations.
pub struct MockDriver {
    pub log: EventLog,
    pub scribe: Option<Scribe>,
    pub passed: u64,
    pub failed: u64,
    pub failure: Option<String>,
}

impl MockDriver {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            scribe: None,
            passed: 0,
            failed: 0,
            failure: None,
        }
    }

    pub fn event(&self, event: impl Into<String>) {
        self.log.lock().expect("log lock").push(event.into());
    }

    /// Simulated HTTP call, transcribed when scribing is on.
    pub fn call(&mut self, label: &str) {
        let scribed = self.scribe.is_some();
        if let Some(scribe) = &self.scribe {
            let response = ResponseSnapshot::capture(Some(200), &json!({ "label": label }))
                .expect("capture");
            scribe
                .reserve()
                .fill("tester", &json!({ "label": label }), response)
                .expect("fill");
        }
        self.event(format!("call:{}:{}", label, if scribed { "scribed" } else { "dark" }));
    }
}

#[async_trait]
impl ApiDriver for MockDriver {
    async fn wait(&mut self) -> FabulaResult<()> {
        self.event("wait");
        Ok(())
    }

    fn scribing_on(&mut self, scribe: Scribe) {
        self.scribe = Some(scribe);
    }

    fn scribing_off(&mut self) {
        self.scribe = None;
    }

    async fn results(&mut self) -> FabulaResult<ExpectationResults> {
        self.event("results");
        let results = ExpectationResults::new(self.passed, self.failed);
        Ok(match &self.failure {
            Some(failure) => results.with_failure(failure.clone()),
            None => results,
        })
    }
}

/// Step that logs itself, makes one call and passes `passed` expectations.
pub fn ok_step(description: &'static str, passed: u64) -> Steps<MockDriver> {
    step(description, move |d: &mut MockDriver| {
        Box::pin(async move {
            d.event(format!("step:{}", description));
            d.call(description);
            d.passed += passed;
            Ok(())
        })
    })
}

/// Step that records one failed expectation.
pub fn failing_step(description: &'static str) -> Steps<MockDriver> {
    step(description, move |d: &mut MockDriver| {
        Box::pin(async move {
            d.event(format!("step:{}", description));
            d.failed += 1;
            d.failure.get_or_insert_with(|| format!("{}: expected 200", description));
            Ok(())
        })
    })
}

/// Step that returns an error.
pub fn error_step(description: &'static str) -> Steps<MockDriver> {
    step(description, move |d: &mut MockDriver| {
        Box::pin(async move {
            d.event(format!("step:{}", description));
            let err: FabulaError = DriverError::new("connection refused").into();
            Err(err)
        })
    })
}

/// Step that panics.
pub fn panic_step(description: &'static str) -> Steps<MockDriver> {
    step(description, move |d: &mut MockDriver| {
        Box::pin(async move {
            d.event(format!("step:{}", description));
            if !description.is_empty() {
                panic!("step exploded");
            }
            Ok(())
        })
    })
}

/// Observer keeping everything it is told.
#[derive(Default)]
pub struct CollectingObserver {
    pub topics: Vec<String>,
    pub stories: Vec<(String, StoryStatus)>,
    pub paths: Vec<PathReport>,
    pub transcripts: Vec<Transcript>,
    pub finished: Option<RunSummary>,
}

impl RunObserver for CollectingObserver {
    fn on_topic(&mut self, description: &str) -> FabulaResult<()> {
        self.topics.push(description.to_string());
        Ok(())
    }

    fn on_story(&mut self, description: &str, status: StoryStatus) -> FabulaResult<()> {
        self.stories.push((description.to_string(), status));
        Ok(())
    }

    fn on_path(&mut self, report: &PathReport) -> FabulaResult<()> {
        self.paths.push(report.clone());
        Ok(())
    }

    fn on_transcript(&mut self, transcript: &Transcript) -> FabulaResult<()> {
        self.transcripts.push(transcript.clone());
        Ok(())
    }

    fn on_finish(&mut self, summary: &RunSummary) -> FabulaResult<()> {
        self.finished = Some(summary.clone());
        Ok(())
    }
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().expect("log lock").clone()
}
