//! Result type alias for govscan

use super::errors::ScanError;

/// Result type alias for govscan operations
///
/// # Examples
///
/// ```
/// use govscan::domain::result::Result;
/// use govscan::domain::errors::ScanError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ScanError::MalformedInput("empty line".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ScanError>;
