//! Scan coordinator - orchestrates scanning of document files
//!
//! Reads each input file, runs the detection pipeline on a blocking worker
//! under the configured time budget, writes the report and the audit entry.
//! Documents are independent: a failure rejects that document only.

use crate::config::{GovscanConfig, ScanConfig};
use crate::core::scan::summary::{DocumentOutcome, ScanSummary};
use crate::detection::{
    ArtifactClassifier, ArtifactSet, AuditLogger, DetectionPipeline, PatternGate, PiiReport,
};
use crate::domain::{Document, Result, ScanError};
use crate::ingest;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Suffix appended to the input file stem to name its report
pub const REPORT_FILE_SUFFIX: &str = "_detected_pii.json";

/// Scan coordinator
pub struct ScanCoordinator {
    pipeline: Arc<DetectionPipeline>,
    audit_logger: Arc<AuditLogger>,
    scan_config: ScanConfig,
    shutdown_signal: watch::Receiver<bool>,
}

impl ScanCoordinator {
    /// Create a coordinator over loaded artifacts
    pub fn new(
        config: &GovscanConfig,
        artifacts: Arc<ArtifactSet>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let gate = PatternGate::from_config(&config.detection)
            .map_err(|e| ScanError::Configuration(format!("{e:#}")))?;
        let classifier = Arc::new(ArtifactClassifier::new(artifacts.clone()));
        let pipeline = DetectionPipeline::new(gate, classifier, artifacts.labels().clone());

        let audit_logger = AuditLogger::from_config(&config.detection.audit)
            .map_err(|e| ScanError::Configuration(format!("{e:#}")))?;

        Ok(Self::with_pipeline(
            pipeline,
            audit_logger,
            config.scan.clone(),
            shutdown_signal,
        ))
    }

    /// Create a coordinator around an existing pipeline
    pub fn with_pipeline(
        pipeline: DetectionPipeline,
        audit_logger: AuditLogger,
        scan_config: ScanConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            audit_logger: Arc::new(audit_logger),
            scan_config,
            shutdown_signal,
        }
    }

    /// Scan settings in effect
    pub fn scan_config(&self) -> &ScanConfig {
        &self.scan_config
    }

    /// Check if shutdown signal has been received
    fn is_shutdown_requested(&self) -> bool {
        *self.shutdown_signal.borrow()
    }

    /// Scan every input file in order.
    ///
    /// Stops before the next document once a shutdown signal arrives; the
    /// document in flight is always finished.
    pub async fn scan_paths(&self, inputs: &[PathBuf]) -> ScanSummary {
        let start_time = Instant::now();
        let mut summary = ScanSummary::new();
        let mut written_reports = HashSet::new();

        tracing::info!(documents = inputs.len(), "Starting scan run");

        for input in inputs {
            if self.is_shutdown_requested() {
                tracing::info!(
                    remaining = inputs.len() - summary.total_documents(),
                    "Shutdown requested, stopping before next document"
                );
                summary.interrupted = true;
                break;
            }

            let outcome = self.scan_path(input, &mut written_reports).await;
            summary.record(outcome);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        summary
    }

    async fn scan_path(
        &self,
        input: &Path,
        written_reports: &mut HashSet<PathBuf>,
    ) -> DocumentOutcome {
        let started = Instant::now();

        let result = async {
            let document = read_document(input.to_path_buf()).await?;
            let report = self.scan_document(document).await?;
            let output_file = self.write_report(input, &report, written_reports)?;
            Ok::<_, ScanError>((report, output_file))
        }
        .await;

        match result {
            Ok((report, output_file)) => {
                let duration = started.elapsed();
                if let Err(e) = self
                    .audit_logger
                    .log_scan(&report, duration.as_millis() as u64)
                {
                    tracing::error!(
                        document = %report.document_name,
                        error = %format!("{e:#}"),
                        "Failed to write audit entry"
                    );
                }
                crate::log_scan_complete!(report.document_name, report.summary.total_pii_items, duration);
                DocumentOutcome::Scanned {
                    input: input.to_path_buf(),
                    report,
                    output_file,
                    duration,
                }
            }
            Err(e) => {
                let context = format!("scanning {}", input.display());
                crate::log_error_with_context!(&e, context.as_str());
                DocumentOutcome::Failed {
                    input: input.to_path_buf(),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Scan one document on a blocking worker, bounded by the configured
    /// timeout
    pub async fn scan_document(&self, document: Document) -> Result<PiiReport> {
        let timeout_seconds = self.scan_config.timeout_seconds;
        let name = document.name().to_string();
        let pipeline = Arc::clone(&self.pipeline);

        crate::log_scan_start!(name, document.len());

        let handle = tokio::task::spawn_blocking(move || pipeline.scan(&document));

        match tokio::time::timeout(Duration::from_secs(timeout_seconds), handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ScanError::Other(format!(
                "Scan worker for {name} failed: {join_error}"
            ))),
            Err(_) => Err(ScanError::Timeout {
                document: name,
                seconds: timeout_seconds,
            }),
        }
    }

    /// Write the report file. A name already used earlier in this run gets
    /// a numeric suffix instead of overwriting that report.
    fn write_report(
        &self,
        input: &Path,
        report: &PiiReport,
        written_reports: &mut HashSet<PathBuf>,
    ) -> Result<Option<PathBuf>> {
        if !self.scan_config.output_format.writes_json() {
            return Ok(None);
        }

        let output_dir = self.scan_config.output_directory.as_deref();
        let mut path = report_path(input, output_dir);
        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent.to_path_buf()
            }
            None => PathBuf::from("."),
        };
        let dir = std::fs::canonicalize(&dir)?;

        let mut sequence = 1;
        while !written_reports.insert(dir.join(file_name_of(&path))) {
            sequence += 1;
            path = numbered_report_path(input, output_dir, sequence);
        }
        if sequence > 1 {
            tracing::warn!(
                document = %report.document_name,
                output = %path.display(),
                "Report name already used in this run, writing numbered report"
            );
        }

        report.write_to_file(&path)?;

        tracing::debug!(document = %report.document_name, output = %path.display(), "Report written");
        Ok(Some(path))
    }
}

fn file_name_of(path: &Path) -> PathBuf {
    path.file_name().map(PathBuf::from).unwrap_or_default()
}

async fn read_document(path: PathBuf) -> Result<Document> {
    tokio::task::spawn_blocking(move || ingest::read_document(&path))
        .await
        .map_err(|e| ScanError::Other(format!("Read worker failed: {e}")))?
}

/// Location of the report file for an input file:
/// `<output_dir or input dir>/<input stem>_detected_pii.json`
pub fn report_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    place_report(input, output_dir, format!("{}{REPORT_FILE_SUFFIX}", input_stem(input)))
}

/// Report location for the `sequence`-th input sharing a stem:
/// `<stem>_<sequence>_detected_pii.json`
fn numbered_report_path(input: &Path, output_dir: Option<&Path>, sequence: usize) -> PathBuf {
    place_report(
        input,
        output_dir,
        format!("{}_{sequence}{REPORT_FILE_SUFFIX}", input_stem(input)),
    )
}

fn input_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

fn place_report(input: &Path, output_dir: Option<&Path>, file_name: String) -> PathBuf {
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input
            .parent()
            .map(|p| p.join(&file_name))
            .unwrap_or_else(|| PathBuf::from(&file_name)),
    }
}
