//! Integration tests for classifier artifact loading
//!
//! Every broken artifact must fail the whole load with an artifact error;
//! there is no partially loaded state.

mod common;

use common::*;
use govscan::detection::classifier::artifacts::{self, ArtifactSet};
use govscan::domain::{PiiCategory, ScanError};
use serde_json::json;
use tempfile::TempDir;

fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    dir
}

fn load(dir: &TempDir) -> Result<ArtifactSet, ScanError> {
    ArtifactSet::load(&artifacts_config(dir.path()))
}

fn assert_artifact_error(result: Result<ArtifactSet, ScanError>, artifact: &str, needle: &str) {
    match result {
        Err(ScanError::ArtifactLoad {
            artifact: got,
            reason,
        }) => {
            assert_eq!(got, artifact);
            assert!(reason.contains(needle), "reason '{reason}' lacks '{needle}'");
        }
        other => panic!("expected artifact error, got {other:?}"),
    }
}

#[test]
fn test_load_valid_artifacts() {
    let dir = fixture_dir();
    let set = load(&dir).unwrap();

    assert_eq!(set.vectorizer().n_features(), 10);
    assert_eq!(set.model().classes().len(), 4);
    assert_eq!(set.labels().display(PiiCategory::Pan), PAN_LABEL);
}

#[test]
fn test_missing_model_file() {
    let dir = fixture_dir();
    std::fs::remove_file(dir.path().join("pii_svm_model.json")).unwrap();

    assert_artifact_error(load(&dir), "model", "file not found");
}

#[test]
fn test_unparsable_vectorizer() {
    let dir = fixture_dir();
    std::fs::write(dir.path().join("tfidf_vectorizer.json"), "{ not json").unwrap();

    assert_artifact_error(load(&dir), "feature transform", "invalid header");
}

#[test]
fn test_wrong_format_tag() {
    let dir = fixture_dir();
    let mut model = model_json();
    model["format"] = json!("random-forest");
    write_json(dir.path(), "pii_svm_model.json", &model);

    assert_artifact_error(load(&dir), "model", "expected format 'linear-svm'");
}

#[test]
fn test_unsupported_version() {
    let dir = fixture_dir();
    let mut labels = label_mapping_json();
    labels["version"] = json!(2);
    write_json(dir.path(), "label_mapping.json", &labels);

    assert_artifact_error(load(&dir), "label mapping", "unsupported version 2");
}

#[test]
fn test_schema_mismatch() {
    let dir = fixture_dir();
    write_json(
        dir.path(),
        "pii_svm_model.json",
        &json!({"format": "linear-svm", "version": 1, "classes": ["A", "B"]}),
    );

    assert_artifact_error(load(&dir), "model", "schema mismatch");
}

#[test]
fn test_feature_dimension_mismatch() {
    let dir = fixture_dir();
    let mut vectorizer = vectorizer_json();
    vectorizer["idf"] = json!([1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    write_json(dir.path(), "tfidf_vectorizer.json", &vectorizer);

    assert_artifact_error(load(&dir), "model", "features");
}

#[test]
fn test_label_mapping_missing_category() {
    let dir = fixture_dir();
    write_json(
        dir.path(),
        "label_mapping.json",
        &json!({
            "format": "label-mapping",
            "version": 1,
            "labels": {"AADHAAR": "Aadhaar Number", "PAN": "PAN Number"}
        }),
    );

    let err = load(&dir).unwrap_err();
    assert!(matches!(err, ScanError::ArtifactLoad { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_custom_file_names() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "vec.json", &vectorizer_json());
    write_json(dir.path(), "svm.json", &model_json());
    write_json(dir.path(), "labels.json", &label_mapping_json());

    let config = govscan::config::ArtifactsConfig {
        directory: dir.path().to_path_buf(),
        vectorizer_file: "vec.json".to_string(),
        model_file: "svm.json".to_string(),
        label_mapping_file: "labels.json".to_string(),
    };
    assert!(ArtifactSet::load(&config).is_ok());
}

// The only test in this binary that touches the process-wide cell
#[test]
fn test_global_artifacts_load_once() {
    assert!(artifacts::global().is_none());

    let missing = tempfile::tempdir().unwrap();
    assert!(artifacts::init_global(&artifacts_config(missing.path())).is_err());
    assert!(artifacts::global().is_none());

    let dir = fixture_dir();
    let first = artifacts::init_global(&artifacts_config(dir.path())).unwrap();

    // Later calls reuse the loaded set even if the files are gone
    drop(dir);
    let second = artifacts::init_global(&artifacts_config(missing.path())).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert!(std::sync::Arc::ptr_eq(&first, &artifacts::global().unwrap()));
}
