//! Frozen linear text classifier
//!
//! One-vs-rest linear decision function over TF-IDF vectors, the inference
//! half of a linear SVM. Class names are free-form in the artifact; only the
//! three known category tags ever become a confirmed category.

use super::vectorizer::FeatureVector;
use crate::domain::errors::ScanError;
use crate::domain::result::Result;
use crate::domain::Classification;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Artifact name used in error messages
pub const MODEL_ARTIFACT: &str = "model";

/// Serialized form of the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelRecord {
    /// Class labels, in coefficient row order
    pub classes: Vec<String>,

    /// One coefficient row per class, or a single row for binary models
    pub coef: Vec<Vec<f64>>,

    /// One intercept per coefficient row
    pub intercept: Vec<f64>,
}

/// Linear one-vs-rest classifier
#[derive(Debug, Clone)]
pub struct LinearModel {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
}

impl LinearModel {
    /// Build the model, checking the record for internal consistency
    pub fn from_record(record: LinearModelRecord) -> Result<Self> {
        let invalid = |reason: String| ScanError::artifact(MODEL_ARTIFACT, reason);

        if record.classes.len() < 2 {
            return Err(invalid(format!(
                "expected at least 2 classes, found {}",
                record.classes.len()
            )));
        }
        let distinct: HashSet<&String> = record.classes.iter().collect();
        if distinct.len() != record.classes.len() {
            return Err(invalid("class labels are not unique".to_string()));
        }

        let expected_rows = if record.classes.len() == 2 {
            1
        } else {
            record.classes.len()
        };
        if record.coef.len() != expected_rows {
            return Err(invalid(format!(
                "expected {expected_rows} coefficient rows for {} classes, found {}",
                record.classes.len(),
                record.coef.len()
            )));
        }
        if record.intercept.len() != record.coef.len() {
            return Err(invalid(format!(
                "expected {} intercepts, found {}",
                record.coef.len(),
                record.intercept.len()
            )));
        }

        let n_features = record.coef[0].len();
        if n_features == 0 {
            return Err(invalid("coefficient rows are empty".to_string()));
        }
        if let Some(row) = record.coef.iter().position(|r| r.len() != n_features) {
            return Err(invalid(format!(
                "coefficient row {row} has {} features, expected {n_features}",
                record.coef[row].len()
            )));
        }
        let all_finite = record
            .coef
            .iter()
            .flatten()
            .chain(record.intercept.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(invalid("coefficients must be finite".to_string()));
        }

        Ok(Self {
            classes: record.classes,
            coef: record.coef,
            intercept: record.intercept,
            n_features,
        })
    }

    /// Dimension of accepted feature vectors
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Class labels known to the model
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Decision score per coefficient row
    pub fn decision_function(&self, x: &FeatureVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, intercept)| {
                x.iter()
                    .filter_map(|(&idx, &value)| row.get(idx).map(|w| w * value))
                    .sum::<f64>()
                    + intercept
            })
            .collect()
    }

    /// Predict the class of one feature vector.
    ///
    /// Multiclass ties and non-finite scores yield
    /// [`Classification::Unrecognized`].
    pub fn predict(&self, x: &FeatureVector) -> Classification {
        let scores = self.decision_function(x);
        if scores.iter().any(|s| !s.is_finite()) {
            return Classification::Unrecognized;
        }

        // Binary models have one row; only a positive score selects classes[1]
        let winner = if let [score] = scores.as_slice() {
            Some(if *score > 0.0 { 1 } else { 0 })
        } else {
            let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mut leaders = scores
                .iter()
                .enumerate()
                .filter(|(_, s)| **s == best)
                .map(|(idx, _)| idx);
            match (leaders.next(), leaders.next()) {
                (Some(idx), None) => Some(idx),
                _ => None,
            }
        };

        winner.map_or(Classification::Unrecognized, |idx| {
            Classification::from_label(&self.classes[idx])
        })
    }
}
