//! Loading of the frozen classifier artifacts
//!
//! Three JSON blobs make up the classifier: the feature transform, the model
//! and the label mapping. Each carries a `format` tag and a `version`
//! number. Any missing, unparsable or mismatched blob fails the load; there
//! is no partial or degraded mode.

use super::labels::{LabelMapping, LabelMappingRecord, LABEL_MAPPING_ARTIFACT};
use super::model::{LinearModel, LinearModelRecord, MODEL_ARTIFACT};
use super::vectorizer::{TfidfVectorizer, VectorizerRecord, VECTORIZER_ARTIFACT};
use crate::config::ArtifactsConfig;
use crate::domain::errors::ScanError;
use crate::domain::result::Result;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Artifact schema version understood by this build
pub const ARTIFACT_VERSION: u32 = 1;

/// `format` tag of the feature transform blob
pub const VECTORIZER_FORMAT: &str = "tfidf-vectorizer";

/// `format` tag of the model blob
pub const MODEL_FORMAT: &str = "linear-svm";

/// `format` tag of the label mapping blob
pub const LABEL_MAPPING_FORMAT: &str = "label-mapping";

static GLOBAL_ARTIFACTS: OnceCell<Arc<ArtifactSet>> = OnceCell::new();

#[derive(Debug, Deserialize)]
struct ArtifactHeader {
    format: String,
    version: u32,
}

/// The loaded, immutable classifier artifacts
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    vectorizer: TfidfVectorizer,
    model: LinearModel,
    labels: LabelMapping,
}

impl ArtifactSet {
    /// Assemble a set from already built parts, checking that the feature
    /// transform and the model agree on the feature dimension
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        model: LinearModel,
        labels: LabelMapping,
    ) -> Result<Self> {
        if vectorizer.n_features() != model.n_features() {
            return Err(ScanError::artifact(
                MODEL_ARTIFACT,
                format!(
                    "model expects {} features but the feature transform produces {}",
                    model.n_features(),
                    vectorizer.n_features()
                ),
            ));
        }

        Ok(Self {
            vectorizer,
            model,
            labels,
        })
    }

    /// Load all three artifacts from the configured location
    pub fn load(config: &ArtifactsConfig) -> Result<Self> {
        let vectorizer_path = config.vectorizer_path();
        let model_path = config.model_path();
        let labels_path = config.label_mapping_path();

        tracing::debug!(
            vectorizer = %vectorizer_path.display(),
            model = %model_path.display(),
            label_mapping = %labels_path.display(),
            "Loading classifier artifacts"
        );

        let vectorizer_record: VectorizerRecord =
            read_artifact(&vectorizer_path, VECTORIZER_ARTIFACT, VECTORIZER_FORMAT)?;
        let model_record: LinearModelRecord =
            read_artifact(&model_path, MODEL_ARTIFACT, MODEL_FORMAT)?;
        let labels_record: LabelMappingRecord =
            read_artifact(&labels_path, LABEL_MAPPING_ARTIFACT, LABEL_MAPPING_FORMAT)?;

        let set = Self::from_parts(
            TfidfVectorizer::from_record(vectorizer_record)?,
            LinearModel::from_record(model_record)?,
            LabelMapping::from_record(labels_record)?,
        )?;

        tracing::info!(
            n_features = set.vectorizer.n_features(),
            vocabulary = set.vectorizer.vocabulary_len(),
            classes = ?set.model.classes(),
            "Classifier artifacts loaded"
        );

        Ok(set)
    }

    /// Feature transform
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Model
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Label mapping
    pub fn labels(&self) -> &LabelMapping {
        &self.labels
    }
}

/// Load the artifacts into the process-wide cell, once.
///
/// Later calls return the set loaded by the first successful call and do
/// not touch the filesystem again.
pub fn init_global(config: &ArtifactsConfig) -> Result<Arc<ArtifactSet>> {
    GLOBAL_ARTIFACTS
        .get_or_try_init(|| ArtifactSet::load(config).map(Arc::new))
        .cloned()
}

/// The process-wide artifacts, if [`init_global`] has succeeded
pub fn global() -> Option<Arc<ArtifactSet>> {
    GLOBAL_ARTIFACTS.get().cloned()
}

/// Read one artifact blob, checking its header before decoding the body
fn read_artifact<T: DeserializeOwned>(path: &Path, artifact: &str, format: &str) -> Result<T> {
    let invalid = |reason: String| ScanError::artifact(artifact, reason);

    if !path.exists() {
        return Err(invalid(format!("file not found: {}", path.display())));
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| invalid(format!("failed to read {}: {e}", path.display())))?;

    let header: ArtifactHeader = serde_json::from_str(&contents)
        .map_err(|e| invalid(format!("invalid header in {}: {e}", path.display())))?;

    if header.format != format {
        return Err(invalid(format!(
            "expected format '{format}', found '{}'",
            header.format
        )));
    }
    if header.version != ARTIFACT_VERSION {
        return Err(invalid(format!(
            "unsupported version {} (supported: {ARTIFACT_VERSION})",
            header.version
        )));
    }

    serde_json::from_str(&contents)
        .map_err(|e| invalid(format!("schema mismatch in {}: {e}", path.display())))
}
