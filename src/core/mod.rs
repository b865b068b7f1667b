//! Core orchestration for Govscan.
//!
//! # Scan Workflow
//!
//! 1. **Load artifacts**: once per process, before any document
//! 2. **Read**: plain-text file to trimmed, non-blank lines
//! 3. **Detect**: candidate gate, then classifier, then grouping
//! 4. **Report**: JSON file and/or console rendering
//! 5. **Audit**: one hashed entry per scanned document
//!
//! # Example
//!
//! ```rust,no_run
//! use govscan::config::load_config;
//! use govscan::core::scan::ScanCoordinator;
//! use govscan::detection::classifier::artifacts;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("govscan.toml")?;
//! let artifacts = artifacts::init_global(&config.artifacts)?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = ScanCoordinator::new(&config, artifacts, shutdown_rx)?;
//!
//! let summary = coordinator
//!     .scan_paths(&[PathBuf::from("aadhaar_card.txt")])
//!     .await;
//! println!("Found {} identifiers", summary.total_pii_items);
//! # Ok(())
//! # }
//! ```

pub mod scan;
