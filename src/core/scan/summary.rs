//! Scan summary and reporting
//!
//! Tracks the per-document outcomes of a scan run.

use crate::detection::PiiReport;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of scanning one input file
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    /// The document was scanned and its report produced
    Scanned {
        /// Input file
        input: PathBuf,
        /// The report
        report: PiiReport,
        /// Report file, when JSON output is enabled
        output_file: Option<PathBuf>,
        /// Scan time
        duration: Duration,
    },
    /// The document was rejected; no report exists for it
    Failed {
        /// Input file
        input: PathBuf,
        /// Error message
        error: String,
    },
}

impl DocumentOutcome {
    /// Input file of this outcome
    pub fn input(&self) -> &PathBuf {
        match self {
            Self::Scanned { input, .. } | Self::Failed { input, .. } => input,
        }
    }

    /// The report, if the document was scanned
    pub fn report(&self) -> Option<&PiiReport> {
        match self {
            Self::Scanned { report, .. } => Some(report),
            Self::Failed { .. } => None,
        }
    }
}

/// Summary of a scan run
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Number of documents scanned successfully
    pub scanned_documents: usize,

    /// Number of documents that failed
    pub failed_documents: usize,

    /// Identifiers found over all scanned documents
    pub total_pii_items: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Whether the run stopped early on a shutdown signal
    pub interrupted: bool,

    /// Per-document outcomes in input order
    pub outcomes: Vec<DocumentOutcome>,
}

impl ScanSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a document outcome
    pub fn record(&mut self, outcome: DocumentOutcome) {
        match &outcome {
            DocumentOutcome::Scanned { report, .. } => {
                self.scanned_documents += 1;
                self.total_pii_items += report.summary.total_pii_items;
            }
            DocumentOutcome::Failed { .. } => self.failed_documents += 1,
        }
        self.outcomes.push(outcome);
    }

    /// Documents attempted
    pub fn total_documents(&self) -> usize {
        self.scanned_documents + self.failed_documents
    }

    /// Check if every attempted document was scanned
    pub fn is_successful(&self) -> bool {
        self.failed_documents == 0
    }

    /// Iterate over the failures
    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            DocumentOutcome::Failed { input, error } => Some((input, error.as_str())),
            DocumentOutcome::Scanned { .. } => None,
        })
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_documents = self.total_documents(),
            scanned = self.scanned_documents,
            failed = self.failed_documents,
            total_pii_items = self.total_pii_items,
            duration_ms = self.duration.as_millis() as u64,
            interrupted = self.interrupted,
            "Scan run completed"
        );

        for (input, error) in self.failures() {
            tracing::warn!(input = %input.display(), error = %error, "Document failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::classifier::labels::{LabelMapping, LabelMappingRecord};
    use crate::detection::{Detections, ReportBuilder};
    use crate::domain::{Line, PiiCategory};

    fn report(name: &str, lines: &[&str]) -> PiiReport {
        let labels = LabelMapping::from_record(LabelMappingRecord {
            labels: [
                ("AADHAAR", "Aadhaar Number"),
                ("PAN", "PAN Number"),
                ("PASSPORT", "Passport Number"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        })
        .unwrap();
        let mut detections = Detections::empty();
        for line in lines {
            detections.push(PiiCategory::Passport, Line::new(*line).unwrap());
        }
        ReportBuilder::new(labels).build(name, &detections)
    }

    #[test]
    fn test_empty_summary() {
        let summary = ScanSummary::new();
        assert_eq!(summary.total_documents(), 0);
        assert!(summary.is_successful());
        assert!(!summary.interrupted);
    }

    #[test]
    fn test_record_outcomes() {
        let mut summary = ScanSummary::new();
        summary.record(DocumentOutcome::Scanned {
            input: PathBuf::from("a.txt"),
            report: report("a.txt", &["A1234567", "B7654321"]),
            output_file: None,
            duration: Duration::from_millis(3),
        });
        summary.record(DocumentOutcome::Failed {
            input: PathBuf::from("b.txt"),
            error: "Malformed input: not UTF-8".to_string(),
        });

        assert_eq!(summary.total_documents(), 2);
        assert_eq!(summary.scanned_documents, 1);
        assert_eq!(summary.failed_documents, 1);
        assert_eq!(summary.total_pii_items, 2);
        assert!(!summary.is_successful());

        let failures: Vec<_> = summary.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, &PathBuf::from("b.txt"));
        assert!(summary.outcomes[1].report().is_none());
    }

    #[test]
    fn test_with_duration() {
        let summary = ScanSummary::new().with_duration(Duration::from_secs(2));
        assert_eq!(summary.duration, Duration::from_secs(2));
    }
}
