//! Configuration schema types
//!
//! This module defines the configuration structure for Govscan.

use crate::detection::config::DetectionConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Govscan configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GovscanConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Classifier artifact locations
    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Candidate gate and audit settings
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Per-document scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GovscanConfig {
    /// Load configuration from a TOML file
    ///
    /// Thin wrapper over [`load_config`](crate::config::load_config).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::domain::Result<Self> {
        crate::config::load_config(path)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.artifacts.validate()?;
        self.detection.validate().map_err(|e| format!("{e:#}"))?;
        self.scan.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Location of the three classifier artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory holding the artifact files
    #[serde(default = "default_artifacts_directory")]
    pub directory: PathBuf,

    /// Feature transform file name
    #[serde(default = "default_vectorizer_file")]
    pub vectorizer_file: String,

    /// Model file name
    #[serde(default = "default_model_file")]
    pub model_file: String,

    /// Label mapping file name
    #[serde(default = "default_label_mapping_file")]
    pub label_mapping_file: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            directory: default_artifacts_directory(),
            vectorizer_file: default_vectorizer_file(),
            model_file: default_model_file(),
            label_mapping_file: default_label_mapping_file(),
        }
    }
}

impl ArtifactsConfig {
    /// Full path of the feature transform
    pub fn vectorizer_path(&self) -> PathBuf {
        self.directory.join(&self.vectorizer_file)
    }

    /// Full path of the model
    pub fn model_path(&self) -> PathBuf {
        self.directory.join(&self.model_file)
    }

    /// Full path of the label mapping
    pub fn label_mapping_path(&self) -> PathBuf {
        self.directory.join(&self.label_mapping_file)
    }

    fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("vectorizer_file", &self.vectorizer_file),
            ("model_file", &self.model_file),
            ("label_mapping_file", &self.label_mapping_file),
        ] {
            if value.trim().is_empty() {
                return Err(format!("artifacts.{key} cannot be empty"));
            }
        }
        Ok(())
    }
}

/// How scan results are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty JSON file per document
    #[default]
    Json,
    /// Human-readable console rendering
    Console,
    /// Both of the above
    Both,
}

impl OutputFormat {
    /// Whether a JSON file is written
    pub fn writes_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    /// Whether the report is printed
    pub fn prints_console(self) -> bool {
        matches!(self, Self::Console | Self::Both)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "console" => Ok(Self::Console),
            "both" => Ok(Self::Both),
            _ => Err(format!(
                "Invalid output format '{s}'. Must be one of: json, console, both"
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Json => "json",
            Self::Console => "console",
            Self::Both => "both",
        };
        f.write_str(s)
    }
}

/// Per-document scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Upper bound on the time spent on one document
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Where report files are written; next to the input when unset
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Report output format
    #[serde(default)]
    pub output_format: OutputFormat,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            output_directory: None,
            output_format: OutputFormat::default(),
        }
    }
}

impl ScanConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("scan.timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_artifacts_directory() -> PathBuf {
    PathBuf::from("./artifacts")
}

fn default_vectorizer_file() -> String {
    "tfidf_vectorizer.json".to_string()
}

fn default_model_file() -> String {
    "pii_svm_model.json".to_string()
}

fn default_label_mapping_file() -> String {
    "label_mapping.json".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
