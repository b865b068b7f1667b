//! Scan orchestration
//!
//! - Per-document scanning under a time budget
//! - Report file output and audit entries
//! - Summary of the run

pub mod coordinator;
pub mod summary;

pub use coordinator::{report_path, ScanCoordinator, REPORT_FILE_SUFFIX};
pub use summary::{DocumentOutcome, ScanSummary};
