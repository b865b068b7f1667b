//! Scan command implementation
//!
//! This module implements the `scan` command for detecting government
//! identifiers in text documents.

use crate::config::{load_config, load_config_from_str, GovscanConfig, OutputFormat};
use crate::core::scan::{DocumentOutcome, ScanCoordinator, ScanSummary};
use crate::detection::classifier::artifacts;
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::sync::watch;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Text files to scan
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Directory for report files (default: next to each input)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override output format (json, console, both)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(files = self.files.len(), "Starting scan command");

        let mut config = match load_scan_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(ref dir) = self.output_dir {
            tracing::info!(output_dir = %dir.display(), "Overriding output directory from CLI");
            config.scan.output_directory = Some(dir.clone());
        }
        if let Some(format) = self.format {
            tracing::info!(format = %format, "Overriding output format from CLI");
            config.scan.output_format = format;
        }

        let artifact_set = match artifacts::init_global(&config.artifacts) {
            Ok(a) => a,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load classifier artifacts");
                eprintln!("Failed to load classifier artifacts: {e}");
                return Ok(3); // Artifact load exit code
            }
        };

        let coordinator = match ScanCoordinator::new(&config, artifact_set, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create scan coordinator");
                eprintln!("Failed to initialize scan: {e}");
                return Ok(2);
            }
        };

        let summary = coordinator.scan_paths(&self.files).await;

        if config.scan.output_format.prints_console() {
            for report in summary.outcomes.iter().filter_map(DocumentOutcome::report) {
                print!("{}", report.format_console());
            }
        }

        Self::print_summary(&summary);

        Ok(exit_code(&summary))
    }

    fn print_summary(summary: &ScanSummary) {
        eprintln!();
        eprintln!("📊 Scan Summary:");
        eprintln!("  Documents: {}", summary.total_documents());
        eprintln!("  Scanned: {}", summary.scanned_documents);
        eprintln!("  Failed: {}", summary.failed_documents);
        eprintln!("  PII items found: {}", summary.total_pii_items);
        eprintln!("  Duration: {:.2}s", summary.duration.as_secs_f64());

        for outcome in &summary.outcomes {
            match outcome {
                DocumentOutcome::Scanned {
                    output_file: Some(path),
                    ..
                } => eprintln!("  📄 {}", path.display()),
                DocumentOutcome::Failed { input, error } => {
                    eprintln!("  ❌ {}: {error}", input.display())
                }
                DocumentOutcome::Scanned { .. } => {}
            }
        }
        eprintln!();

        if summary.interrupted {
            eprintln!("⚠️  Scan interrupted; remaining documents were skipped.");
        } else if summary.is_successful() {
            eprintln!("✅ Scan completed successfully!");
        } else {
            eprintln!("⚠️  Scan completed with failures");
        }
    }
}

/// Load the configuration file, or the defaults when it does not exist
fn load_scan_config(config_path: &str) -> crate::domain::Result<GovscanConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::warn!(
            config_path = %config_path,
            "Configuration file not found, using defaults"
        );
        load_config_from_str("")
    }
}

/// Process exit code for a finished run
pub fn exit_code(summary: &ScanSummary) -> i32 {
    if summary.interrupted {
        130 // SIGINT exit code (standard Unix convention)
    } else if summary.is_successful() {
        0
    } else {
        1 // At least one document failed
    }
}
