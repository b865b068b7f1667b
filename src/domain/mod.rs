//! Domain models and types for govscan.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Input value types** ([`Line`], [`Document`])
//! - **Category vocabulary** ([`PiiCategory`], [`Classification`])
//! - **Error types** ([`ScanError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ScanError>`]:
//!
//! ```rust
//! use govscan::domain::{Document, Result};
//!
//! fn example() -> Result<()> {
//!     let document = Document::from_raw("scan.txt", vec!["Name: A. Kumar", "A1234567"])?;
//!     assert_eq!(document.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod category;
pub mod errors;
pub mod line;
pub mod result;

// Re-export commonly used types for convenience
pub use category::{Classification, PiiCategory};
pub use errors::ScanError;
pub use line::{Document, Line};
pub use result::Result;
