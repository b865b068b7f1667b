//! Statistical classification of candidate lines
//!
//! Provides the trait-based classification interface and the artifact-backed
//! implementation (TF-IDF feature transform + linear model).

pub mod artifacts;
pub mod labels;
pub mod model;
pub mod vectorizer;

pub use artifacts::ArtifactSet;
pub use labels::LabelMapping;

use crate::domain::result::Result;
use crate::domain::{Classification, Line};
use std::sync::Arc;

/// Trait for candidate classifiers
///
/// Implementations label a batch of lines. The result is index-aligned with
/// the input, and the label of line `i` must not depend on which other lines
/// share the batch.
pub trait LineClassifier: Send + Sync {
    /// Classify a batch of candidate lines
    fn classify(&self, lines: &[&Line]) -> Result<Vec<Classification>>;
}

/// Classifier backed by the frozen artifacts
#[derive(Debug, Clone)]
pub struct ArtifactClassifier {
    artifacts: Arc<ArtifactSet>,
}

impl ArtifactClassifier {
    /// Create a classifier over shared artifacts
    pub fn new(artifacts: Arc<ArtifactSet>) -> Self {
        Self { artifacts }
    }

    /// The underlying artifacts
    pub fn artifacts(&self) -> &Arc<ArtifactSet> {
        &self.artifacts
    }

    /// Classify a single line
    pub fn classify_one(&self, line: &Line) -> Classification {
        let features = self.artifacts.vectorizer().transform(line.as_str());
        self.artifacts.model().predict(&features)
    }
}

impl LineClassifier for ArtifactClassifier {
    fn classify(&self, lines: &[&Line]) -> Result<Vec<Classification>> {
        Ok(lines.iter().map(|line| self.classify_one(line)).collect())
    }
}
