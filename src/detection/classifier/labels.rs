//! Category display labels

use crate::domain::errors::ScanError;
use crate::domain::result::Result;
use crate::domain::PiiCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Artifact name used in error messages
pub const LABEL_MAPPING_ARTIFACT: &str = "label mapping";

/// Serialized form of the label mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelMappingRecord {
    /// Internal tag to display string
    pub labels: BTreeMap<String, String>,
}

/// Exhaustive mapping from category to its display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMapping {
    labels: [String; 3],
}

impl LabelMapping {
    /// Build the mapping; every category needs exactly one non-empty, unique label
    pub fn from_record(record: LabelMappingRecord) -> Result<Self> {
        let invalid = |reason: String| ScanError::artifact(LABEL_MAPPING_ARTIFACT, reason);

        // Extra entries (e.g. the model's negative class) carry no display label
        for unknown in record
            .labels
            .keys()
            .filter(|tag| PiiCategory::from_tag(tag).is_none())
        {
            tracing::warn!(tag = %unknown, "Ignoring label for unknown category tag");
        }

        let lookup = |category: PiiCategory| -> Result<String> {
            match record.labels.get(category.tag()) {
                Some(label) if !label.trim().is_empty() => Ok(label.clone()),
                Some(_) => Err(invalid(format!("empty label for {category}"))),
                None => Err(invalid(format!("missing label for {category}"))),
            }
        };

        let labels = [
            lookup(PiiCategory::Aadhaar)?,
            lookup(PiiCategory::Pan)?,
            lookup(PiiCategory::Passport)?,
        ];

        let distinct: HashSet<&String> = labels.iter().collect();
        if distinct.len() != labels.len() {
            return Err(invalid("display labels must be unique".to_string()));
        }

        Ok(Self { labels })
    }

    /// Display label of a category
    pub fn display(&self, category: PiiCategory) -> &str {
        match category {
            PiiCategory::Aadhaar => &self.labels[0],
            PiiCategory::Pan => &self.labels[1],
            PiiCategory::Passport => &self.labels[2],
        }
    }
}
