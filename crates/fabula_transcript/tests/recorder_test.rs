//! Tests for transcript recording across multiple paths of a topic.

use fabula_interface::{ResponseSnapshot, Scribe};
use fabula_transcript::TranscriptRecorder;
use serde_json::json;

fn call(scribe: &Scribe, label: &str) {
    let response = ResponseSnapshot::capture(Some(200), &json!({ "ok": true })).expect("capture");
    scribe
        .reserve()
        .fill("tester", &json!({ "label": label }), response)
        .expect("fill");
}

/// Runs one path, scribing one action per step labelled with the path index.
fn run_path(recorder: &mut TranscriptRecorder, steps: &[(&str, bool)], path: usize) {
    recorder.begin_path();
    for (description, is_fork) in steps {
        recorder.begin_step(description, *is_fork);
        call(&recorder.scribe(), &format!("{}#{}", description, path));
        recorder.end_scope();
    }
    recorder.end_path();
}

fn labels(transcript: &fabula_transcript::Transcript) -> Vec<(String, usize, bool, String)> {
    transcript.stories()[0]
        .steps()
        .iter()
        .map(|s| {
            let request = s.actions()[0].request().clone().expect("request");
            (
                s.description().clone(),
                *s.depth(),
                *s.is_fork(),
                request["label"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_shared_prefix_recorded_once() {
    let mut recorder = TranscriptRecorder::new("Topic");
    recorder.begin_story("story");
    run_path(&mut recorder, &[("a", false), ("b", true), ("c", false)], 0);
    run_path(&mut recorder, &[("a", false), ("d", true), ("e", false)], 1);
    recorder.end_story();

    let transcript = recorder.finish();
    let steps = labels(&transcript);
    assert_eq!(
        steps,
        vec![
            ("a".to_string(), 0, false, "a#0".to_string()),
            ("b".to_string(), 1, true, "b#0".to_string()),
            ("c".to_string(), 2, false, "c#0".to_string()),
            ("d".to_string(), 1, true, "d#1".to_string()),
            ("e".to_string(), 2, false, "e#1".to_string()),
        ]
    );
}

#[test]
fn test_same_description_under_different_prefix_is_kept() {
    let mut recorder = TranscriptRecorder::new("Topic");
    recorder.begin_story("story");
    run_path(&mut recorder, &[("login", false), ("x", true), ("check", false)], 0);
    run_path(&mut recorder, &[("login", false), ("y", true), ("check", false)], 1);
    recorder.end_story();

    let transcript = recorder.finish();
    let checks = transcript.stories()[0]
        .steps()
        .iter()
        .filter(|s| s.description() == "check")
        .count();
    assert_eq!(checks, 2);
}

#[test]
fn test_stories_do_not_share_prefixes() {
    let mut recorder = TranscriptRecorder::new("Topic");
    recorder.begin_story("first");
    run_path(&mut recorder, &[("a", false)], 0);
    recorder.end_story();
    recorder.begin_story("second");
    run_path(&mut recorder, &[("a", false)], 1);
    recorder.end_story();

    let transcript = recorder.finish();
    assert_eq!(transcript.stories().len(), 2);
    assert_eq!(transcript.story("first").map(|s| s.steps().len()), Some(1));
    assert_eq!(transcript.story("second").map(|s| s.steps().len()), Some(1));
}

#[test]
fn test_only_first_setup_is_persisted() {
    let mut recorder = TranscriptRecorder::new("Topic");
    for i in 0..3 {
        recorder.begin_setup();
        call(&recorder.scribe(), &format!("setup#{}", i));
        recorder.end_scope();
    }

    let transcript = recorder.finish();
    let setup = transcript.setup().as_ref().expect("setup");
    assert_eq!(setup.actions().len(), 1);
    assert_eq!(
        setup.actions()[0].request().as_ref().map(|r| r["label"].clone()),
        Some(json!("setup#0"))
    );
}

#[test]
fn test_serialized_shape() {
    let mut recorder = TranscriptRecorder::new("Shape");
    recorder.begin_story("story");
    recorder.begin_path();
    recorder.begin_step("step", false);
    let scribe = recorder.scribe();
    scribe.doc("note");
    let _never_filled = scribe.reserve();
    recorder.end_scope();
    recorder.end_path();
    recorder.end_story();

    let value = serde_json::to_value(recorder.finish()).expect("serialize");
    assert_eq!(
        value,
        json!({
            "description": "Shape (stories)",
            "stories": [{
                "description": "story",
                "steps": [{
                    "description": "step",
                    "depth": 0,
                    "isFork": false,
                    "actions": [{}],
                    "docStrings": { "0": ["note"] }
                }]
            }]
        })
    );
}
