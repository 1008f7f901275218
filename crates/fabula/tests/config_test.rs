//! Tests for layered configuration loading.

use fabula::{ConfigErrorKind, RunnerConfig};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn toml_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
    Some(
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[test]
fn test_from_file() {
    let file = toml_file(
        r#"
endpoint = "http://localhost:8080"
transcripts_dir = "out/transcripts"
"#,
    );
    let config = RunnerConfig::from_file(file.path()).expect("valid config");
    assert_eq!(config.endpoint().as_deref(), Some("http://localhost:8080"));
    assert_eq!(
        config.transcripts_dir().as_deref(),
        Some(PathBuf::from("out/transcripts").as_path())
    );
    assert!(config.commit().is_none());
}

#[test]
fn test_from_file_rejects_bad_toml() {
    let file = toml_file("endpoint = ");
    let err = RunnerConfig::from_file(file.path()).expect_err("malformed");
    assert!(matches!(err.kind(), ConfigErrorKind::Parse(_)));
}

#[test]
fn test_environment_overrides_file() {
    let file = toml_file(
        r#"
endpoint = "http://from-file"
commit = "aaa"
"#,
    );
    let config = RunnerConfig::load_with_env(
        Some(file.path()),
        env(&[("FABULA_ENDPOINT", "http://from-env"), ("OTHER_ENDPOINT", "ignored")]),
    )
    .expect("valid config");
    assert_eq!(config.endpoint().as_deref(), Some("http://from-env"));
    assert_eq!(config.commit().as_deref(), Some("aaa"));
}

#[test]
fn test_explicit_file_must_exist() {
    let missing = std::env::temp_dir().join("fabula-no-such-config.toml");
    let err = RunnerConfig::load_with_env(Some(&missing), env(&[])).expect_err("missing file");
    assert!(matches!(err.kind(), ConfigErrorKind::Load(_)));
}

#[test]
fn test_defaults_when_nothing_is_set() {
    let config = RunnerConfig::load_with_env(None, env(&[])).expect("defaults");
    assert_eq!(config, RunnerConfig::default());
}

#[test]
fn test_overrides_win_over_loaded_values() {
    let file = toml_file(r#"endpoint = "http://from-file""#);
    let config = RunnerConfig::from_file(file.path())
        .expect("valid config")
        .with_overrides(None, Some(PathBuf::from("transcripts")), Some("bbb".into()));
    assert_eq!(config.endpoint().as_deref(), Some("http://from-file"));
    assert_eq!(config.transcripts_dir().as_deref(), Some(PathBuf::from("transcripts").as_path()));
    assert_eq!(config.commit().as_deref(), Some("bbb"));
}

#[test]
fn test_from_file_reports_unreadable_file() {
    let missing = std::env::temp_dir().join("fabula-no-such-file.toml");
    let err = RunnerConfig::from_file(&missing).expect_err("missing file");
    assert!(matches!(err.kind(), ConfigErrorKind::Read(_)));
}

#[test]
fn test_wrongly_typed_setting_is_invalid() {
    let file = toml_file("transcripts_dir = [1, 2]");
    let err = RunnerConfig::load_with_env(Some(file.path()), env(&[])).expect_err("bad type");
    assert!(matches!(err.kind(), ConfigErrorKind::Invalid(_)));
}
