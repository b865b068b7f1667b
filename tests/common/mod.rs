//! Shared fixtures for integration tests
//!
//! The fixture artifacts form a tiny but real classifier:
//! - digit groups and "aadhaar" score for AADHAAR
//! - "pan" scores for PAN
//! - "a1234567" and "passport" score for PASSPORT
//! - the bare PAN-shaped token "abcde1234f" and greetings lean to NONE,
//!   which is not a known category and therefore unrecognized

#![allow(dead_code)]

use govscan::config::ArtifactsConfig;
use govscan::detection::classifier::artifacts::ArtifactSet;
use govscan::detection::{ArtifactClassifier, DetectionPipeline, LineClassifier, PatternGate};
use govscan::domain::{Classification, Line, Result};
use serde_json::json;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const AADHAAR_LABEL: &str = "Aadhaar Number";
pub const PAN_LABEL: &str = "PAN Number";
pub const PASSPORT_LABEL: &str = "Passport Number";

pub fn vectorizer_json() -> serde_json::Value {
    json!({
        "format": "tfidf-vectorizer",
        "version": 1,
        "lowercase": true,
        "norm": "l2",
        "vocabulary": {
            "1234": 0, "5678": 1, "9012": 2, "aadhaar": 3,
            "abcde1234f": 4, "pan": 5,
            "a1234567": 6, "passport": 7,
            "hello": 8, "world": 9
        },
        "idf": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
    })
}

pub fn model_json() -> serde_json::Value {
    json!({
        "format": "linear-svm",
        "version": 1,
        "classes": ["AADHAAR", "NONE", "PAN", "PASSPORT"],
        "coef": [
            [1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0]
        ],
        "intercept": [0.0, 0.01, 0.0, 0.0]
    })
}

pub fn label_mapping_json() -> serde_json::Value {
    json!({
        "format": "label-mapping",
        "version": 1,
        "labels": {
            "AADHAAR": AADHAAR_LABEL,
            "PAN": PAN_LABEL,
            "PASSPORT": PASSPORT_LABEL
        }
    })
}

/// Write the three fixture artifacts under their default names
pub fn write_artifacts(dir: &Path) {
    write_json(dir, "tfidf_vectorizer.json", &vectorizer_json());
    write_json(dir, "pii_svm_model.json", &model_json());
    write_json(dir, "label_mapping.json", &label_mapping_json());
}

pub fn write_json(dir: &Path, name: &str, value: &serde_json::Value) {
    std::fs::write(dir.join(name), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn artifacts_config(dir: &Path) -> ArtifactsConfig {
    ArtifactsConfig {
        directory: dir.to_path_buf(),
        ..ArtifactsConfig::default()
    }
}

/// Load the fixture artifacts from a fresh temporary directory
pub fn fixture_artifacts() -> Arc<ArtifactSet> {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    Arc::new(ArtifactSet::load(&artifacts_config(dir.path())).unwrap())
}

/// Pipeline over the fixture artifacts, with a call-counting classifier
pub fn counting_pipeline() -> (DetectionPipeline, Arc<CountingClassifier>) {
    let artifacts = fixture_artifacts();
    let classifier = Arc::new(CountingClassifier::new(ArtifactClassifier::new(
        artifacts.clone(),
    )));
    let pipeline = DetectionPipeline::new(
        PatternGate::new().unwrap(),
        classifier.clone(),
        artifacts.labels().clone(),
    );
    (pipeline, classifier)
}

pub fn lines(texts: &[&str]) -> Vec<Line> {
    texts.iter().map(|t| Line::new(*t).unwrap()).collect()
}

/// Wraps a classifier and records how often and on what it was called
pub struct CountingClassifier {
    inner: ArtifactClassifier,
    batches: AtomicUsize,
    lines_seen: AtomicUsize,
    seen: std::sync::Mutex<Vec<String>>,
}

impl CountingClassifier {
    pub fn new(inner: ArtifactClassifier) -> Self {
        Self {
            inner,
            batches: AtomicUsize::new(0),
            lines_seen: AtomicUsize::new(0),
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn batches(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }

    pub fn lines_seen(&self) -> usize {
        self.lines_seen.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl LineClassifier for CountingClassifier {
    fn classify(&self, lines: &[&Line]) -> Result<Vec<Classification>> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        self.lines_seen.fetch_add(lines.len(), Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .extend(lines.iter().map(|l| l.as_str().to_string()));
        self.inner.classify(lines)
    }
}
