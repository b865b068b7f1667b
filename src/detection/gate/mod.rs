//! Candidate gate
//!
//! Cheap, deterministic pre-filter in front of the classifier. A line is a
//! candidate when at least one category pattern matches somewhere inside
//! it. The gate never decides a category; a line shaped like both a PAN and
//! a passport number is still a single candidate.

pub mod patterns;

use crate::detection::config::{CasePolicy, DetectionConfig};
use crate::domain::{Line, PiiCategory};
use anyhow::Result;
use patterns::PatternRegistry;
use std::sync::Arc;

/// Regex-based candidate gate
#[derive(Debug, Clone)]
pub struct PatternGate {
    pattern_registry: Arc<PatternRegistry>,
}

impl PatternGate {
    /// Create a gate with the built-in patterns and strict letter case
    pub fn new() -> Result<Self> {
        Self::with_case_policy(CasePolicy::Strict)
    }

    /// Create a gate with the built-in patterns
    pub fn with_case_policy(case_policy: CasePolicy) -> Result<Self> {
        let registry = PatternRegistry::default_patterns(case_policy)?;
        Ok(Self::with_registry(registry))
    }

    /// Create a gate with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
        }
    }

    /// Create a gate from detection settings
    pub fn from_config(config: &DetectionConfig) -> Result<Self> {
        let registry = match config.pattern_library {
            Some(ref path) => PatternRegistry::from_file(path, config.case_policy)?,
            None => PatternRegistry::default_patterns(config.case_policy)?,
        };
        Ok(Self::with_registry(registry))
    }

    /// Whether the line matches at least one category pattern
    pub fn is_candidate(&self, line: &Line) -> bool {
        self.pattern_registry
            .all_patterns()
            .iter()
            .any(|p| p.regex.is_match(line.as_str()))
    }

    /// Categories whose patterns match the line, in report order.
    ///
    /// Diagnostic only; category assignment belongs to the classifier.
    pub fn matching_categories(&self, line: &Line) -> Vec<PiiCategory> {
        PiiCategory::ALL
            .into_iter()
            .filter(|category| {
                self.pattern_registry
                    .patterns_for_category(*category)
                    .is_some_and(|patterns| {
                        patterns.iter().any(|p| p.regex.is_match(line.as_str()))
                    })
            })
            .collect()
    }

    /// Number of compiled patterns for a category
    pub fn pattern_count(&self, category: PiiCategory) -> usize {
        self.pattern_registry
            .patterns_for_category(category)
            .map_or(0, <[_]>::len)
    }

    /// Keep only candidate lines, preserving order
    pub fn filter<'a>(&self, lines: &'a [Line]) -> Vec<&'a Line> {
        lines.iter().filter(|line| self.is_candidate(line)).collect()
    }
}
