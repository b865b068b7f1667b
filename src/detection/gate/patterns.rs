//! Pattern library for the candidate gate

use crate::detection::config::CasePolicy;
use crate::domain::PiiCategory;
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternDefinition {
    /// Regex patterns for this category
    pub patterns: Vec<String>,
    /// PII category tag
    pub category: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Name of the library entry
    pub name: String,
    /// Compiled regex
    pub regex: Regex,
    /// PII category
    pub category: PiiCategory,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    // BTreeMap keeps compilation order stable across runs
    patterns: BTreeMap<String, PatternDefinition>,
}

/// Pattern registry for the candidate gate
#[derive(Debug)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
    patterns_by_category: HashMap<PiiCategory, Vec<CompiledPattern>>,
}

impl PatternRegistry {
    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P, case_policy: CasePolicy) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content, case_policy)
    }

    /// Create a pattern registry from TOML content
    ///
    /// Every known category must be covered by at least one pattern.
    pub fn from_toml(content: &str, case_policy: CasePolicy) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut patterns = Vec::new();
        let mut patterns_by_category: HashMap<PiiCategory, Vec<CompiledPattern>> = HashMap::new();

        for (name, def) in library.patterns {
            let category = PiiCategory::from_tag(&def.category.to_uppercase())
                .with_context(|| {
                    format!("Invalid category in pattern '{}': {}", name, def.category)
                })?;

            for pattern_str in &def.patterns {
                let regex = RegexBuilder::new(pattern_str)
                    .case_insensitive(case_policy == CasePolicy::Insensitive)
                    .build()
                    .with_context(|| format!("Invalid regex in pattern '{name}': {pattern_str}"))?;

                let compiled = CompiledPattern {
                    name: name.clone(),
                    regex,
                    category,
                };

                patterns.push(compiled.clone());
                patterns_by_category
                    .entry(category)
                    .or_default()
                    .push(compiled);
            }
        }

        let missing: Vec<&str> = PiiCategory::ALL
            .iter()
            .filter(|c| !patterns_by_category.contains_key(*c))
            .map(|c| c.tag())
            .collect();
        if !missing.is_empty() {
            anyhow::bail!(
                "Pattern library has no patterns for: {}",
                missing.join(", ")
            );
        }

        Ok(Self {
            patterns,
            patterns_by_category,
        })
    }

    /// Create a registry with the built-in patterns
    pub fn default_patterns(case_policy: CasePolicy) -> Result<Self> {
        let default_toml = include_str!("../../../patterns/gov_id_patterns.toml");
        Self::from_toml(default_toml, case_policy)
    }

    /// Get all patterns
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Get patterns for a specific category
    pub fn patterns_for_category(&self, category: PiiCategory) -> Option<&[CompiledPattern]> {
        self.patterns_by_category
            .get(&category)
            .map(|v| v.as_slice())
    }
}
