//! Logging and observability
//!
//! Structured logging with:
//! - Human-readable console output on stderr
//! - JSON file logs with rotation
//! - Level selection by config, CLI flag or `RUST_LOG`
//!
//! Log events carry document names and counts only. Line text is
//! identifier-bearing and is never logged.
//!
//! # Example
//!
//! ```no_run
//! use govscan::logging::init_logging;
//! use govscan::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a document scan
///
/// # Example
///
/// ```no_run
/// use govscan::log_scan_start;
///
/// log_scan_start!("aadhaar_card.txt", 12);
/// ```
#[macro_export]
macro_rules! log_scan_start {
    ($document:expr, $lines:expr) => {
        tracing::info!(
            document = %$document,
            lines = $lines,
            "Starting scan"
        );
    };
}

/// Log the completion of a document scan
///
/// # Example
///
/// ```no_run
/// use govscan::log_scan_complete;
/// use std::time::Duration;
///
/// log_scan_complete!("aadhaar_card.txt", 2, Duration::from_millis(4));
/// ```
#[macro_export]
macro_rules! log_scan_complete {
    ($document:expr, $total:expr, $duration:expr) => {
        tracing::info!(
            document = %$document,
            total_pii_items = $total,
            duration_ms = $duration.as_millis() as u64,
            "Scan completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use govscan::log_error_with_context;
/// use govscan::domain::ScanError;
///
/// let error = ScanError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
