//! Domain error types
//!
//! This module defines the error hierarchy for govscan. Errors raised by the
//! pattern gate and the classifier propagate through the detection pipeline
//! unchanged; the pipeline adds no failure modes of its own.

use thiserror::Error;

/// Main govscan error type
#[derive(Debug, Error)]
pub enum ScanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required model artifact is missing or malformed.
    ///
    /// Fatal at startup: detection cannot proceed without every artifact.
    #[error("Failed to load artifact '{artifact}': {reason}")]
    ArtifactLoad { artifact: String, reason: String },

    /// The input line sequence of a single document is not well-formed
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The classifier broke its contract (e.g. returned a misaligned batch)
    #[error("Classification error: {0}")]
    Classification(String),

    /// A document scan exceeded its time budget
    #[error("Scan timed out after {seconds}s: {document}")]
    Timeout { document: String, seconds: u64 },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ScanError {
    /// Shorthand for an [`ScanError::ArtifactLoad`] error
    pub fn artifact(artifact: impl Into<String>, reason: impl Into<String>) -> Self {
        ScanError::ArtifactLoad {
            artifact: artifact.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure only affects the current document.
    ///
    /// Artifact and configuration errors stop the process; everything else
    /// rejects one document and lets the caller continue with the next.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ScanError::ArtifactLoad { .. } | ScanError::Configuration(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ScanError {
    fn from(err: toml::de::Error) -> Self {
        ScanError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_artifact_error_display() {
        let err = ScanError::artifact("pii_svm_model.json", "file not found");
        assert_eq!(
            err.to_string(),
            "Failed to load artifact 'pii_svm_model.json': file not found"
        );
    }

    #[test]
    fn test_recoverability() {
        assert!(!ScanError::artifact("x", "y").is_recoverable());
        assert!(!ScanError::Configuration("bad".to_string()).is_recoverable());
        assert!(ScanError::MalformedInput("empty line".to_string()).is_recoverable());
        assert!(ScanError::Classification("misaligned".to_string()).is_recoverable());
        assert!(ScanError::Timeout {
            document: "a.txt".to_string(),
            seconds: 1
        }
        .is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ScanError = io_err.into();
        assert!(matches!(err, ScanError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ScanError = json_err.into();
        assert!(matches!(err, ScanError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ScanError = toml_err.into();
        assert!(matches!(err, ScanError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_scan_error_implements_std_error() {
        let err = ScanError::MalformedInput("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
