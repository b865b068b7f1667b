//! Detection configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Letter-case handling of the candidate gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    /// Letters in PAN and passport patterns must be uppercase
    #[default]
    Strict,
    /// Patterns also match lowercase letters (OCR output, hand-typed text)
    Insensitive,
}

impl std::str::FromStr for CasePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "insensitive" => Ok(Self::Insensitive),
            _ => anyhow::bail!("Invalid case policy '{s}'. Must be one of: strict, insensitive"),
        }
    }
}

/// Candidate gate and pattern library settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Letter-case handling of the gate patterns
    #[serde(default)]
    pub case_policy: CasePolicy,

    /// Path to a pattern library TOML file replacing the built-in one
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl DetectionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        self.audit.validate().context("Invalid audit configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("GOVSCAN_DETECTION_CASE_POLICY") {
            self.case_policy = val
                .parse()
                .context("Invalid GOVSCAN_DETECTION_CASE_POLICY value")?;
        }

        if let Ok(val) = std::env::var("GOVSCAN_DETECTION_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_enabled() -> bool {
    true
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/govscan.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("audit.log_path cannot be empty when auditing is enabled");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("GOVSCAN_AUDIT_ENABLED") {
            self.enabled = val.parse().context("Invalid GOVSCAN_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("GOVSCAN_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("GOVSCAN_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid GOVSCAN_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}
