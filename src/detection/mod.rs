//! Government-ID detection
//!
//! Two-stage detection over the lines of a document:
//!
//! 1. [`PatternGate`] keeps lines whose text matches at least one identifier
//!    shape (Aadhaar, PAN, passport).
//! 2. A [`LineClassifier`] labels the surviving lines; lines labelled
//!    [`Classification::Unrecognized`](crate::domain::Classification) are dropped.
//!
//! Confirmed lines are grouped into [`Detections`] and rendered into a
//! [`PiiReport`] by the [`ReportBuilder`].

pub mod audit;
pub mod classifier;
pub mod config;
pub mod gate;
pub mod pipeline;
pub mod report;

pub use audit::AuditLogger;
pub use classifier::{ArtifactClassifier, ArtifactSet, LabelMapping, LineClassifier};
pub use config::{AuditConfig, CasePolicy, DetectionConfig};
pub use gate::PatternGate;
pub use pipeline::{DetectionPipeline, Detections};
pub use report::{PiiReport, ReportBuilder, ReportSummary};
