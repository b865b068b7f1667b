//! Two-stage detection pipeline
//!
//! Runs the candidate gate over a document's lines, classifies the
//! survivors in a single batch and groups them by category.
//!
//! # Examples
//!
//! ```no_run
//! use govscan::config::ArtifactsConfig;
//! use govscan::detection::{ArtifactClassifier, ArtifactSet, DetectionPipeline, PatternGate};
//! use govscan::domain::Document;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let artifacts = Arc::new(ArtifactSet::load(&ArtifactsConfig::default())?);
//! let pipeline = DetectionPipeline::new(
//!     PatternGate::new()?,
//!     Arc::new(ArtifactClassifier::new(artifacts.clone())),
//!     artifacts.labels().clone(),
//! );
//!
//! let document = Document::from_raw("id.txt", vec!["Passport No: A1234567"])?;
//! let report = pipeline.scan(&document)?;
//! println!("{} identifiers found", report.summary.total_pii_items);
//! # Ok(())
//! # }
//! ```

use crate::detection::classifier::{LabelMapping, LineClassifier};
use crate::detection::gate::PatternGate;
use crate::detection::report::{PiiReport, ReportBuilder};
use crate::domain::errors::ScanError;
use crate::domain::result::Result;
use crate::domain::{Document, Line, PiiCategory};
use std::sync::Arc;

/// Confirmed lines grouped by category, each group in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detections {
    aadhaar: Vec<Line>,
    pan: Vec<Line>,
    passport: Vec<Line>,
}

impl Detections {
    /// An all-empty grouping
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lines confirmed for a category
    pub fn lines(&self, category: PiiCategory) -> &[Line] {
        match category {
            PiiCategory::Aadhaar => &self.aadhaar,
            PiiCategory::Pan => &self.pan,
            PiiCategory::Passport => &self.passport,
        }
    }

    /// Number of lines confirmed for a category
    pub fn count(&self, category: PiiCategory) -> usize {
        self.lines(category).len()
    }

    /// Total confirmed lines over all categories
    pub fn total(&self) -> usize {
        PiiCategory::ALL.iter().map(|c| self.count(*c)).sum()
    }

    /// Whether nothing was confirmed
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Groups in report order
    pub fn iter(&self) -> impl Iterator<Item = (PiiCategory, &[Line])> + '_ {
        PiiCategory::ALL.into_iter().map(|c| (c, self.lines(c)))
    }

    /// Append a confirmed line to its category
    pub fn push(&mut self, category: PiiCategory, line: Line) {
        match category {
            PiiCategory::Aadhaar => self.aadhaar.push(line),
            PiiCategory::Pan => self.pan.push(line),
            PiiCategory::Passport => self.passport.push(line),
        }
    }
}

/// Gate → classifier → grouping over one document's lines
///
/// Holds no per-call state; share it across threads behind an `Arc`.
#[derive(Clone)]
pub struct DetectionPipeline {
    gate: PatternGate,
    classifier: Arc<dyn LineClassifier>,
    report_builder: ReportBuilder,
}

impl DetectionPipeline {
    /// Create a pipeline
    pub fn new(
        gate: PatternGate,
        classifier: Arc<dyn LineClassifier>,
        labels: LabelMapping,
    ) -> Self {
        Self {
            gate,
            classifier,
            report_builder: ReportBuilder::new(labels),
        }
    }

    /// The candidate gate
    pub fn gate(&self) -> &PatternGate {
        &self.gate
    }

    /// The report builder
    pub fn report_builder(&self) -> &ReportBuilder {
        &self.report_builder
    }

    /// Detect identifiers in a sequence of lines.
    ///
    /// The classifier is not invoked at all when no line passes the gate.
    pub fn detect(&self, lines: &[Line]) -> Result<Detections> {
        let candidates = self.gate.filter(lines);

        tracing::debug!(
            lines = lines.len(),
            candidates = candidates.len(),
            "Candidate gate applied"
        );

        if candidates.is_empty() {
            return Ok(Detections::empty());
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            for (candidate, line) in candidates.iter().enumerate() {
                tracing::debug!(
                    candidate,
                    shapes = ?self.gate.matching_categories(line),
                    "Candidate matched"
                );
            }
        }

        let labels = self.classifier.classify(&candidates)?;
        if labels.len() != candidates.len() {
            return Err(ScanError::Classification(format!(
                "classifier returned {} labels for {} candidates",
                labels.len(),
                candidates.len()
            )));
        }

        let mut detections = Detections::empty();
        let mut unrecognized = 0usize;
        for (line, label) in candidates.into_iter().zip(labels) {
            match label.category() {
                Some(category) => detections.push(category, line.clone()),
                None => unrecognized += 1,
            }
        }

        tracing::debug!(
            confirmed = detections.total(),
            unrecognized,
            "Candidates classified"
        );

        Ok(detections)
    }

    /// Detect identifiers in a document and build its report
    pub fn scan(&self, document: &Document) -> Result<PiiReport> {
        let detections = self.detect(document.lines())?;
        Ok(self.report_builder.build(document.name(), &detections))
    }
}

impl std::fmt::Debug for DetectionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionPipeline")
            .field("gate", &self.gate)
            .field("report_builder", &self.report_builder)
            .finish_non_exhaustive()
    }
}
