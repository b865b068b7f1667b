//! Plain-text document ingestion
//!
//! Turns raw text into the ordered, trimmed, non-blank lines the detection
//! pipeline expects. The document is identified by its file name.

use crate::domain::errors::ScanError;
use crate::domain::result::Result;
use crate::domain::Document;
use std::path::Path;

/// Split raw text into trimmed, non-blank lines, preserving order
pub fn extract_lines(text: &str) -> Vec<String> {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build a document from raw text
pub fn document_from_text(name: impl Into<String>, text: &str) -> Result<Document> {
    Document::from_raw(name, extract_lines(text))
}

/// Read a UTF-8 text file into a document named after the file
///
/// # Errors
///
/// - [`ScanError::Io`] when the file cannot be read
/// - [`ScanError::MalformedInput`] when the content is not valid UTF-8
pub fn read_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ScanError::MalformedInput(format!("not a file path: {}", path.display()))
        })?;

    let bytes = std::fs::read(path)
        .map_err(|e| ScanError::Io(format!("Failed to read {}: {e}", path.display())))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        ScanError::MalformedInput(format!(
            "{} is not valid UTF-8 (byte offset {})",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })?;

    tracing::debug!(document = %name, bytes = text.len(), "Document read");

    document_from_text(name, &text)
}
