//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Govscan using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Govscan - Government-ID PII detection
#[derive(Parser, Debug)]
#[command(name = "govscan")]
#[command(version, about, long_about = None)]
#[command(author = "Govscan Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "govscan.toml", env = "GOVSCAN_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GOVSCAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan text documents for Aadhaar, PAN and passport numbers
    Scan(commands::scan::ScanArgs),

    /// Validate configuration file and classifier artifacts
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
