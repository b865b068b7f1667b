//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "govscan.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Govscan configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Place the classifier artifacts in the [artifacts] directory:");
                println!("     tfidf_vectorizer.json, pii_svm_model.json, label_mapping.json");
                println!("  2. Validate configuration: govscan validate-config");
                println!("  3. Scan documents: govscan scan <FILE>...");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Govscan Configuration File
# Government-ID PII detection

[application]
log_level = "info"

[artifacts]
directory = "./artifacts"
vectorizer_file = "tfidf_vectorizer.json"
model_file = "pii_svm_model.json"
label_mapping_file = "label_mapping.json"

[detection]
case_policy = "strict"

[detection.audit]
enabled = true
log_path = "./audit/govscan.log"
json_format = true

[scan]
timeout_seconds = 30
output_format = "json"

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Govscan Configuration File
# Government-ID PII detection
#
# This file contains all configuration options with examples and explanations.
# Any value can reference an environment variable with ${VAR_NAME}, and any
# key can be overridden with GOVSCAN_<SECTION>_<KEY>.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Classifier Artifacts
# ============================================================================
[artifacts]
# Directory holding the three artifact files
directory = "./artifacts"

# Feature transform (TF-IDF vocabulary and weights)
vectorizer_file = "tfidf_vectorizer.json"

# Linear model (one-vs-rest coefficients)
model_file = "pii_svm_model.json"

# Category tag to display label mapping
label_mapping_file = "label_mapping.json"

# ============================================================================
# Detection
# ============================================================================
[detection]
# Letter case of PAN and passport patterns:
# - strict: uppercase only
# - insensitive: also match lowercase (OCR output, hand-typed text)
case_policy = "strict"

# Optional: replace the built-in pattern library
# pattern_library = "./patterns/gov_id_patterns.toml"

# Audit log: one entry per scanned document, lines stored as SHA-256 hashes
[detection.audit]
enabled = true
log_path = "./audit/govscan.log"
json_format = true

# ============================================================================
# Scanning
# ============================================================================
[scan]
# Upper bound on the time spent on one document
timeout_seconds = 30

# Where <name>_detected_pii.json files go (default: next to each input)
# output_directory = "./reports"

# Output format: json | console | both
output_format = "json"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local file logging (JSON lines)
local_enabled = true

# Local log directory
local_path = "./logs"

# Log rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    #[test]
    fn test_generated_configs_are_valid() {
        let minimal = load_config_from_str(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(minimal.scan.timeout_seconds, 30);

        let full = load_config_from_str(&InitArgs::generate_config_with_examples()).unwrap();
        assert!(full.detection.audit.enabled);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("govscan.toml");
        std::fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "# existing");
    }

    #[tokio::test]
    async fn test_init_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("govscan.toml");

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: true,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("[detection.audit]"));
    }
}
