//! Detection report
//!
//! Turns grouped detections into the externally consumed report: per
//! category counts plus the matched lines keyed by display label.

use crate::detection::classifier::LabelMapping;
use crate::detection::pipeline::Detections;
use crate::domain::PiiCategory;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::path::Path;

/// Per-category counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Lines confirmed as Aadhaar numbers
    pub aadhaar_count: usize,
    /// Lines confirmed as PAN numbers
    pub pan_count: usize,
    /// Lines confirmed as passport numbers
    pub passport_count: usize,
    /// Sum of the three category counts
    pub total_pii_items: usize,
}

impl ReportSummary {
    /// Count for a category
    pub fn count(&self, category: PiiCategory) -> usize {
        match category {
            PiiCategory::Aadhaar => self.aadhaar_count,
            PiiCategory::Pan => self.pan_count,
            PiiCategory::Passport => self.passport_count,
        }
    }
}

/// Matched lines of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLines {
    /// Category
    pub category: PiiCategory,
    /// Display label of the category
    pub label: String,
    /// Matched line texts in document order
    pub lines: Vec<String>,
}

/// Matched lines per category, always in AADHAAR, PAN, PASSPORT order.
///
/// Serializes as a JSON object keyed by display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedPii {
    groups: Vec<CategoryLines>,
}

impl DetectedPii {
    /// Groups in report order
    pub fn groups(&self) -> &[CategoryLines] {
        &self.groups
    }

    /// Lines listed under a display label
    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.lines.as_slice())
    }

    /// Lines listed for a category
    pub fn for_category(&self, category: PiiCategory) -> &[String] {
        self.groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.lines.as_slice())
            .unwrap_or(&[])
    }
}

impl Serialize for DetectedPii {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.label, &group.lines)?;
        }
        map.end()
    }
}

/// Result of scanning one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PiiReport {
    /// Document identifier
    pub document_name: String,
    /// Counts
    pub summary: ReportSummary,
    /// Matched lines keyed by display label
    pub detected_pii: DetectedPii,
}

impl PiiReport {
    /// Whether any identifier was confirmed
    pub fn has_detections(&self) -> bool {
        self.summary.total_pii_items > 0
    }

    /// Format report as pretty JSON with four-space indentation
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write report to file
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        let json = self.format_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    GOVERNMENT ID PII REPORT                   \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📄 DOCUMENT\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  {}\n", self.document_name));
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        for group in self.detected_pii.groups() {
            output.push_str(&format!(
                "  {:30} {:>5}\n",
                group.label,
                self.summary.count(group.category)
            ));
        }
        output.push_str(&format!(
            "  {:30} {:>5}\n",
            "Total PII Items", self.summary.total_pii_items
        ));
        output.push('\n');

        if self.has_detections() {
            output.push_str("🔍 DETECTED LINES\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for group in self.detected_pii.groups().iter().filter(|g| !g.lines.is_empty()) {
                output.push_str(&format!("\n  {}\n", group.label));
                for line in &group.lines {
                    output.push_str(&format!("    • {line}\n"));
                }
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }
}

/// Builds reports from grouped detections
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    labels: LabelMapping,
}

impl ReportBuilder {
    /// Create a builder using the given display labels
    pub fn new(labels: LabelMapping) -> Self {
        Self { labels }
    }

    /// Display labels in use
    pub fn labels(&self) -> &LabelMapping {
        &self.labels
    }

    /// Build the report for one document
    pub fn build(&self, document_id: &str, grouped: &Detections) -> PiiReport {
        let groups: Vec<CategoryLines> = grouped
            .iter()
            .map(|(category, lines)| CategoryLines {
                category,
                label: self.labels.display(category).to_string(),
                lines: lines.iter().map(|l| l.as_str().to_string()).collect(),
            })
            .collect();

        let aadhaar_count = grouped.count(PiiCategory::Aadhaar);
        let pan_count = grouped.count(PiiCategory::Pan);
        let passport_count = grouped.count(PiiCategory::Passport);

        PiiReport {
            document_name: document_id.to_string(),
            summary: ReportSummary {
                aadhaar_count,
                pan_count,
                passport_count,
                total_pii_items: aadhaar_count + pan_count + passport_count,
            },
            detected_pii: DetectedPii { groups },
        }
    }
}
