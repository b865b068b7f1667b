//! Configuration management for Govscan.
//!
//! Govscan uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GOVSCAN_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use govscan::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("govscan.toml")?;
//!
//! println!("Artifacts: {}", config.artifacts.directory.display());
//! println!("Case policy: {:?}", config.detection.case_policy);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ArtifactsConfig`] - Classifier artifact directory and file names
//! - [`DetectionConfig`] - Gate case policy, pattern library, audit log
//! - [`ScanConfig`] - Per-document timeout and report output
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [artifacts]
//! directory = "${GOVSCAN_MODEL_DIR}"
//!
//! [detection]
//! case_policy = "strict"
//!
//! [detection.audit]
//! enabled = true
//! log_path = "./audit/govscan.log"
//!
//! [scan]
//! timeout_seconds = 30
//! output_format = "json"
//! ```

pub mod loader;
pub mod schema;

pub use crate::detection::config::{AuditConfig, CasePolicy, DetectionConfig};
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, ArtifactsConfig, GovscanConfig, LoggingConfig, OutputFormat, ScanConfig,
};
