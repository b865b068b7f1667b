//! Validate config command implementation
//!
//! Loads the configuration file and the classifier artifacts it points at,
//! without scanning anything.

use crate::config::load_config;
use crate::detection::{ArtifactSet, PatternGate};
use crate::domain::PiiCategory;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Only check the configuration file, not the artifacts
    #[arg(long)]
    pub skip_artifacts: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let gate = match PatternGate::from_config(&config.detection) {
            Ok(g) => g,
            Err(e) => {
                println!("❌ Failed to compile pattern library");
                println!("   Error: {e:#}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Artifacts: {}", config.artifacts.directory.display());
        println!("  Case Policy: {:?}", config.detection.case_policy);
        match config.detection.pattern_library {
            Some(ref path) => println!("  Pattern Library: {}", path.display()),
            None => println!("  Pattern Library: built-in"),
        }
        for category in PiiCategory::ALL {
            println!(
                "    {}: {} pattern(s)",
                category,
                gate.pattern_count(category)
            );
        }
        println!("  Timeout: {}s", config.scan.timeout_seconds);
        println!("  Output Format: {}", config.scan.output_format);
        println!(
            "  Audit Log: {}",
            if config.detection.audit.enabled {
                config.detection.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!();

        if self.skip_artifacts {
            return Ok(0);
        }

        match ArtifactSet::load(&config.artifacts) {
            Ok(set) => {
                println!("✅ Classifier artifacts loaded");
                println!("  Features: {}", set.vectorizer().n_features());
                println!("  Classes: {}", set.model().classes().join(", "));
                for category in PiiCategory::ALL {
                    println!("  {} → {}", category, set.labels().display(category));
                }
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to load classifier artifacts");
                println!("   Error: {e}");
                println!();
                Ok(3) // Artifact load exit code
            }
        }
    }
}
