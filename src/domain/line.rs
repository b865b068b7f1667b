//! Line and document value types
//!
//! A [`Line`] is the unit of input text the detection pipeline works on. The
//! text extractor is responsible for trimming lines and discarding blank
//! ones; constructing a `Line` checks that it did.

use super::errors::ScanError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single trimmed, non-empty line of document text
///
/// # Examples
///
/// ```
/// use govscan::domain::Line;
///
/// let line = Line::new("PAN: ABCDE1234F").unwrap();
/// assert_eq!(line.as_str(), "PAN: ABCDE1234F");
///
/// assert!(Line::new("   ").is_err());
/// assert!(Line::new(" padded ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Line(String);

impl Line {
    /// Creates a new line, rejecting text that is empty, untrimmed or spans
    /// more than one line
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(ScanError::MalformedInput("line cannot be empty".to_string()));
        }
        if text.trim() != text {
            return Err(ScanError::MalformedInput(
                "line must not carry leading or trailing whitespace".to_string(),
            ));
        }
        if text.contains(['\n', '\r']) {
            return Err(ScanError::MalformedInput(
                "line must not contain line breaks".to_string(),
            ));
        }
        Ok(Self(text))
    }

    /// Returns the line text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Line {
    type Error = ScanError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Line {
    type Error = ScanError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Line {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Line::new(text).map_err(serde::de::Error::custom)
    }
}

/// A document ready for scanning: an identifier plus its lines in reading order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    name: String,
    lines: Vec<Line>,
}

impl Document {
    /// Creates a document from already validated lines
    pub fn new(name: impl Into<String>, lines: Vec<Line>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScanError::MalformedInput(
                "document name cannot be empty".to_string(),
            ));
        }
        Ok(Self { name, lines })
    }

    /// Creates a document from raw extractor output.
    ///
    /// Every entry must already be a valid [`Line`]; the first offending
    /// entry rejects the whole document.
    pub fn from_raw<I, S>(name: impl Into<String>, raw_lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = raw_lines
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| {
                Line::new(raw).map_err(|e| match e {
                    ScanError::MalformedInput(msg) => {
                        ScanError::MalformedInput(format!("line {}: {msg}", idx + 1))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(name, lines)
    }

    /// Document identifier (typically the file name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lines in original reading order
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
