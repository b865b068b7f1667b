//! Audit logger for document scans
//!
//! Appends one entry per scanned document. Matched lines are recorded as
//! SHA-256 digests only; plaintext identifiers never reach the audit log.

use crate::detection::config::AuditConfig;
use crate::detection::report::PiiReport;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    document_name: String,
    aadhaar_count: usize,
    pan_count: usize,
    passport_count: usize,
    total_pii_items: usize,
    processing_time_ms: u64,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed line)
#[derive(Debug, Serialize)]
struct AuditDetection {
    category: String,
    /// SHA-256 hash of the matched line (never log plaintext PII)
    line_hash: String,
}

/// Audit logger for scans
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
    // serializes appends from concurrent scans
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            // Ensure parent directory exists
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
            write_lock: Mutex::new(()),
        })
    }

    /// Create an audit logger from configuration
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(config.log_path.clone(), config.json_format, config.enabled)
    }

    /// Whether entries are written
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a completed scan
    pub fn log_scan(&self, report: &PiiReport, processing_time_ms: u64) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let detections = report
            .detected_pii
            .groups()
            .iter()
            .flat_map(|group| {
                group.lines.iter().map(move |line| AuditDetection {
                    category: group.category.tag().to_string(),
                    line_hash: Self::hash_line(line),
                })
            })
            .collect();

        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            document_name: report.document_name.clone(),
            aadhaar_count: report.summary.aadhaar_count,
            pan_count: report.summary.pan_count,
            passport_count: report.summary.passport_count,
            total_pii_items: report.summary.total_pii_items,
            processing_time_ms,
            detections,
        };

        self.write_entry(&entry)
    }

    /// Hash a line using SHA-256
    fn hash_line(value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        format!("{result:x}")
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("Audit log lock poisoned"))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            writeln!(
                file,
                "[{}] Document: {} | Aadhaar: {} | PAN: {} | Passport: {} | Total: {} | Time: {}ms",
                entry.timestamp,
                entry.document_name,
                entry.aadhaar_count,
                entry.pan_count,
                entry.passport_count,
                entry.total_pii_items,
                entry.processing_time_ms
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}
