//! CLI command implementations

pub mod init;
pub mod scan;
pub mod validate;
