//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` to avoid
//! interference between tests.

use govscan::config::{load_config, CasePolicy, OutputFormat};
use govscan::domain::ScanError;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("GOVSCAN_APPLICATION_LOG_LEVEL");
    std::env::remove_var("GOVSCAN_ARTIFACTS_DIRECTORY");
    std::env::remove_var("GOVSCAN_DETECTION_CASE_POLICY");
    std::env::remove_var("GOVSCAN_AUDIT_ENABLED");
    std::env::remove_var("GOVSCAN_SCAN_TIMEOUT_SECONDS");
    std::env::remove_var("GOVSCAN_SCAN_OUTPUT_FORMAT");
    std::env::remove_var("TEST_GOVSCAN_MODEL_DIR");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[artifacts]
directory = "/opt/govscan/model"
vectorizer_file = "vectorizer_v3.json"
model_file = "svm_v3.json"
label_mapping_file = "labels_v3.json"

[detection]
case_policy = "insensitive"

[detection.audit]
enabled = true
log_path = "/tmp/govscan/audit.log"
json_format = false

[scan]
timeout_seconds = 12
output_directory = "/tmp/govscan/reports"
output_format = "console"

[logging]
local_enabled = false
local_path = "/tmp/govscan/logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(
        config.artifacts.vectorizer_path(),
        PathBuf::from("/opt/govscan/model/vectorizer_v3.json")
    );
    assert_eq!(
        config.artifacts.label_mapping_path(),
        PathBuf::from("/opt/govscan/model/labels_v3.json")
    );
    assert_eq!(config.detection.case_policy, CasePolicy::Insensitive);
    assert!(!config.detection.audit.json_format);
    assert_eq!(config.scan.timeout_seconds, 12);
    assert_eq!(config.scan.output_format, OutputFormat::Console);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_empty_config_uses_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config("# nothing configured\n");
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(
        config.artifacts.model_path(),
        PathBuf::from("./artifacts/pii_svm_model.json")
    );
    assert_eq!(config.detection.case_policy, CasePolicy::Strict);
    assert!(config.detection.audit.enabled);
    assert_eq!(config.scan.timeout_seconds, 30);
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_GOVSCAN_MODEL_DIR", "/srv/models/current");

    let temp_file = write_config(
        r#"
[artifacts]
directory = "${TEST_GOVSCAN_MODEL_DIR}"
"#,
    );
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(
        config.artifacts.directory,
        PathBuf::from("/srv/models/current")
    );
    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[artifacts]
directory = "${TEST_GOVSCAN_MODEL_DIR}"
"#,
    );
    let err = load_config(temp_file.path()).unwrap_err();

    assert!(matches!(err, ScanError::Configuration(_)));
    assert!(err.to_string().contains("TEST_GOVSCAN_MODEL_DIR"));
}

#[test]
fn test_env_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("GOVSCAN_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("GOVSCAN_ARTIFACTS_DIRECTORY", "/env/model");
    std::env::set_var("GOVSCAN_DETECTION_CASE_POLICY", "insensitive");
    std::env::set_var("GOVSCAN_AUDIT_ENABLED", "false");
    std::env::set_var("GOVSCAN_SCAN_TIMEOUT_SECONDS", "99");
    std::env::set_var("GOVSCAN_SCAN_OUTPUT_FORMAT", "both");

    let temp_file = write_config(
        r#"
[application]
log_level = "info"

[scan]
timeout_seconds = 5
"#,
    );
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.artifacts.directory, PathBuf::from("/env/model"));
    assert_eq!(config.detection.case_policy, CasePolicy::Insensitive);
    assert!(!config.detection.audit.enabled);
    assert_eq!(config.scan.timeout_seconds, 99);
    assert_eq!(config.scan.output_format, OutputFormat::Both);
}

#[test]
fn test_invalid_env_override() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("GOVSCAN_SCAN_TIMEOUT_SECONDS", "soon");

    let temp_file = write_config("");
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    assert!(matches!(result, Err(ScanError::Configuration(_))));
}

#[test]
fn test_invalid_values_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for content in [
        "[application]\nlog_level = \"loud\"\n",
        "[scan]\ntimeout_seconds = 0\n",
        "[scan]\noutput_format = \"xml\"\n",
        "[detection]\ncase_policy = \"fuzzy\"\n",
        "[detection]\npattern_library = \"/nonexistent/patterns.toml\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        let temp_file = write_config(content);
        let result = load_config(temp_file.path());
        assert!(
            matches!(result, Err(ScanError::Configuration(_))),
            "accepted invalid config: {content}"
        );
    }
}

#[test]
fn test_custom_pattern_library() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let library = dir.path().join("patterns.toml");
    std::fs::write(
        &library,
        r#"
[patterns.aadhaar]
category = "AADHAAR"
description = "Twelve digits"
patterns = ['\b[0-9]{12}\b']

[patterns.pan]
category = "PAN"
description = "PAN"
patterns = ['\b[A-Z]{5}[0-9]{4}[A-Z]\b']

[patterns.passport]
category = "PASSPORT"
description = "Passport"
patterns = ['\b[A-Z][0-9]{7}\b']
"#,
    )
    .unwrap();

    let temp_file = write_config(&format!(
        "[detection]\npattern_library = '{}'\n",
        library.display()
    ));
    let config = load_config(temp_file.path()).unwrap();

    let gate = govscan::detection::PatternGate::from_config(&config.detection).unwrap();
    let spaced = govscan::domain::Line::new("1234 5678 9012").unwrap();
    let contiguous = govscan::domain::Line::new("123456789012").unwrap();
    assert!(!gate.is_candidate(&spaced));
    assert!(gate.is_candidate(&contiguous));
}
