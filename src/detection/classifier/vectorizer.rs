//! TF-IDF feature transform
//!
//! Maps a line of text to a sparse, fixed-dimension feature vector using a
//! frozen vocabulary and IDF weights. Tokens outside the vocabulary are
//! dropped silently.

use crate::domain::errors::ScanError;
use crate::domain::result::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Artifact name used in error messages
pub const VECTORIZER_ARTIFACT: &str = "feature transform";

/// Sparse feature vector keyed by feature index.
///
/// Ordered so that every consumer sums features in the same order and
/// results are bit-for-bit reproducible.
pub type FeatureVector = BTreeMap<usize, f64>;

/// Row normalization applied after TF-IDF weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    /// Euclidean (unit length) normalization
    #[default]
    L2,
    /// Manhattan normalization
    L1,
    /// No normalization
    None,
}

/// Serialized form of the feature transform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerRecord {
    /// Lowercase text before tokenizing
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Regex whose matches are the tokens
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Inclusive word n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Use `1 + ln(tf)` instead of raw term counts
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Row normalization
    #[serde(default)]
    pub norm: Norm,

    /// Term to feature index
    pub vocabulary: HashMap<String, usize>,

    /// IDF weight per feature index
    pub idf: Vec<f64>,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Frozen TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    token_regex: Regex,
    lowercase: bool,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Norm,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Build the vectorizer, checking the record for internal consistency
    pub fn from_record(record: VectorizerRecord) -> Result<Self> {
        let invalid = |reason: String| ScanError::artifact(VECTORIZER_ARTIFACT, reason);

        let (min_n, max_n) = record.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(invalid(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        if record.idf.is_empty() {
            return Err(invalid("idf weights are empty".to_string()));
        }
        if let Some(pos) = record.idf.iter().position(|w| !w.is_finite()) {
            return Err(invalid(format!("idf weight at index {pos} is not finite")));
        }
        if let Some((term, idx)) = record
            .vocabulary
            .iter()
            .find(|(_, idx)| **idx >= record.idf.len())
        {
            return Err(invalid(format!(
                "vocabulary term '{term}' maps to index {idx} but only {} features exist",
                record.idf.len()
            )));
        }

        let token_regex = Regex::new(&record.token_pattern)
            .map_err(|e| invalid(format!("invalid token_pattern: {e}")))?;

        Ok(Self {
            token_regex,
            lowercase: record.lowercase,
            ngram_range: record.ngram_range,
            sublinear_tf: record.sublinear_tf,
            norm: record.norm,
            vocabulary: record.vocabulary,
            idf: record.idf,
        })
    }

    /// Dimension of produced vectors
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Number of vocabulary terms
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Transform one text into its feature vector
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts: FeatureVector = BTreeMap::new();
        for term in self.terms(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: FeatureVector = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (idx, tf * self.idf[idx])
            })
            .collect();

        let scale = match self.norm {
            Norm::L2 => vector.values().map(|v| v * v).sum::<f64>().sqrt(),
            Norm::L1 => vector.values().map(|v| v.abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        if scale > 0.0 {
            vector.values_mut().for_each(|v| *v /= scale);
        }

        vector
    }

    /// Tokens and word n-grams of a text, in order of appearance
    fn terms(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_regex
            .find_iter(&text)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vocabulary: &[(&str, usize)], idf: Vec<f64>) -> VectorizerRecord {
        VectorizerRecord {
            lowercase: true,
            token_pattern: default_token_pattern(),
            ngram_range: (1, 1),
            sublinear_tf: false,
            norm: Norm::None,
            vocabulary: vocabulary
                .iter()
                .map(|(t, i)| (t.to_string(), *i))
                .collect(),
            idf,
        }
    }

    #[test]
    fn test_transform_counts_and_weights() {
        let vectorizer =
            TfidfVectorizer::from_record(record(&[("passport", 0), ("no", 1)], vec![2.0, 1.5]))
                .unwrap();
        let v = vectorizer.transform("Passport passport NO");
        assert_eq!(v.get(&0), Some(&4.0));
        assert_eq!(v.get(&1), Some(&1.5));
    }

    #[test]
    fn test_out_of_vocabulary_ignored() {
        let vectorizer = TfidfVectorizer::from_record(record(&[("pan", 0)], vec![1.0])).unwrap();
        assert!(vectorizer.transform("hello world").is_empty());
    }

    #[test]
    fn test_single_char_tokens_skipped_by_default_pattern() {
        let vectorizer = TfidfVectorizer::from_record(record(&[("a", 0)], vec![1.0])).unwrap();
        assert!(vectorizer.transform("a a a").is_empty());
    }

    #[test]
    fn test_l2_norm() {
        let mut s = record(&[("aadhaar", 0), ("number", 1)], vec![3.0, 4.0]);
        s.norm = Norm::L2;
        let vectorizer = TfidfVectorizer::from_record(s).unwrap();
        let v = vectorizer.transform("aadhaar number");
        assert!((v[&0] - 0.6).abs() < 1e-12);
        assert!((v[&1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_sublinear_tf() {
        let mut s = record(&[("pan", 0)], vec![1.0]);
        s.sublinear_tf = true;
        let vectorizer = TfidfVectorizer::from_record(s).unwrap();
        let v = vectorizer.transform("pan pan pan");
        assert!((v[&0] - (1.0 + 3f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_bigrams() {
        let mut s = record(&[("passport", 0), ("passport no", 1)], vec![1.0, 1.0]);
        s.ngram_range = (1, 2);
        let vectorizer = TfidfVectorizer::from_record(s).unwrap();
        let v = vectorizer.transform("Passport No A1234567");
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn test_rejects_out_of_range_vocabulary() {
        let err = TfidfVectorizer::from_record(record(&[("pan", 3)], vec![1.0])).unwrap_err();
        assert!(matches!(err, ScanError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_rejects_bad_ngram_range() {
        let mut s = record(&[("pan", 0)], vec![1.0]);
        s.ngram_range = (2, 1);
        assert!(TfidfVectorizer::from_record(s).is_err());
    }

    #[test]
    fn test_rejects_empty_idf() {
        assert!(TfidfVectorizer::from_record(record(&[], vec![])).is_err());
    }
}
