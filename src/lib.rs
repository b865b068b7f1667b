// Govscan - Government-ID PII Detection
// Copyright (c) 2025 Govscan Contributors
// Licensed under the MIT License

//! # Govscan - Government-ID PII Detection
//!
//! Govscan finds Indian government identifiers (Aadhaar, PAN and passport
//! numbers) in the lines of text documents and reports which lines carry
//! which kind of identifier.
//!
//! ## Overview
//!
//! Detection runs in two stages over the trimmed, non-blank lines of a
//! document:
//!
//! - A **candidate gate** of format patterns keeps lines shaped like an
//!   identifier
//! - A **classifier** (TF-IDF features + linear model, loaded from frozen
//!   artifacts) labels each candidate with a category, or leaves it
//!   unrecognized
//!
//! Confirmed lines are grouped by category and rendered into a JSON report.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Scan orchestration (timeouts, report files, audit)
//! - [`detection`] - Gate, classifier, pipeline and report
//! - [`ingest`] - Plain-text document reading
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use govscan::config::load_config;
//! use govscan::detection::classifier::artifacts;
//! use govscan::detection::{ArtifactClassifier, DetectionPipeline, PatternGate};
//! use govscan::ingest;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("govscan.toml")?;
//! let artifacts = artifacts::init_global(&config.artifacts)?;
//!
//! let pipeline = DetectionPipeline::new(
//!     PatternGate::from_config(&config.detection)?,
//!     Arc::new(ArtifactClassifier::new(artifacts.clone())),
//!     artifacts.labels().clone(),
//! );
//!
//! let document = ingest::read_document("passport_scan.txt")?;
//! let report = pipeline.scan(&document)?;
//! println!("{}", report.format_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`] with [`domain::ScanError`].
//! Artifact and configuration errors are fatal; every other error rejects
//! only the document being scanned:
//!
//! ```rust,no_run
//! use govscan::domain::ScanError;
//!
//! fn example() -> Result<(), ScanError> {
//!     let document = govscan::ingest::read_document("card.txt")?;
//!     println!("{} lines", document.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod detection;
pub mod domain;
pub mod ingest;
pub mod logging;
