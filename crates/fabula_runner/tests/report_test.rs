//! Tests for the console report and transcript persistence observers.

mod common;

use common::{EventLog, MockDriver, error_step, ok_step};
use fabula_core::{Suite, fork};
use fabula_runner::{ConsoleReporter, ObserverChain, REPORT_WIDTH, RunOptions, run_topics};
use fabula_transcript::{INDEX_FILE, TranscriptIndex, TranscriptWriter};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Writer whose contents stay readable after it is handed to the reporter.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().expect("buffer lock").clone()).expect("utf8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn suite(failing: bool) -> Suite<MockDriver> {
    let mut suite = Suite::new();
    suite
        .topic("Accounts", |t| {
            if failing {
                t.story(
                    "sign up",
                    ok_step("register", 1).then(fork([ok_step("confirm", 1), error_step("oops")])),
                );
            } else {
                t.story("sign up", ok_step("register", 2));
            }
            t.story_fn("ping", |d: &mut MockDriver| {
                Box::pin(async move {
                    d.passed += 1;
                    Ok(())
                })
            });
            t.deferred("close account");
        })
        .expect("valid topic");
    suite
}

#[tokio::test]
async fn test_console_report_for_passing_run() {
    let buffer = SharedBuffer::default();
    let mut reporter = ConsoleReporter::new(buffer.clone());
    let log = EventLog::default();
    let factory = move || MockDriver::new(log.clone());

    let summary = run_topics(&suite(false), &factory, &RunOptions::default(), &mut reporter).await;
    assert!(summary.is_success());

    let output = buffer.contents();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2].len(), REPORT_WIDTH);
    assert_eq!(lines[2].trim_start(), "Accounts");
    assert_eq!(lines[3], "-".repeat(REPORT_WIDTH));
    assert_eq!(
        &lines[4..9],
        &["sign up", "  ok: register", "ping", "  ok", "close account"]
    );
    assert_eq!(lines[9], "  #### deferred ####");
    assert_eq!(lines[10].trim_start(), "Expectations Passed: 3");
    assert_eq!(lines[11].trim_start(), "ALL OK!");
}

#[tokio::test]
async fn test_console_report_for_failing_run() {
    let buffer = SharedBuffer::default();
    let mut reporter = ConsoleReporter::new(buffer.clone());
    let log = EventLog::default();
    let factory = move || MockDriver::new(log.clone());

    let summary = run_topics(&suite(true), &factory, &RunOptions::default(), &mut reporter).await;
    assert!(!summary.is_success());

    let output = buffer.contents();
    assert!(output.contains("  ok: register > confirm\n"));
    assert!(output.contains("  XX: register > oops\n"));
    assert!(output.contains("connection refused"));
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[lines.len() - 2].trim_start(), "Expectations Failed: 0");
    assert_eq!(lines[lines.len() - 1].trim_start(), "FAILED!");
}

#[tokio::test]
async fn test_chain_writes_transcripts_and_index() {
    let dir = TempDir::new().expect("tempdir");
    let writer = TranscriptWriter::new(dir.path(), Some("deadbeef".to_string())).expect("writer");
    let buffer = SharedBuffer::default();
    let mut chain = ObserverChain::new()
        .with(ConsoleReporter::new(buffer.clone()))
        .with(writer);
    assert_eq!(chain.len(), 2);

    let log = EventLog::default();
    let factory = move || MockDriver::new(log.clone());
    let summary = run_topics(&suite(false), &factory, &RunOptions::default(), &mut chain).await;
    assert!(summary.is_success());
    assert_eq!(summary.report_errors, 0);

    let transcript = dir.path().join("Accounts_(stories).json");
    assert!(transcript.exists());

    let index: TranscriptIndex = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join(INDEX_FILE)).expect("read index"),
    )
    .expect("parse index");
    assert_eq!(index.commit().as_deref(), Some("deadbeef"));
    assert_eq!(index.transcripts().len(), 1);
    assert_eq!(index.transcripts()[0].desc(), "Accounts (stories)");
    assert!(buffer.contents().contains("ALL OK!"));
}
