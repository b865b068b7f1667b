//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GovscanConfig;
use crate::domain::errors::ScanError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GovscanConfig
/// 4. Applies environment variable overrides (GOVSCAN_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ScanError::Configuration`] if the file cannot be read or
/// parsed, a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use govscan::config::loader::load_config;
///
/// let config = load_config("govscan.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GovscanConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ScanError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ScanError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same steps as [`load_config`] minus the file read.
pub fn load_config_from_str(contents: &str) -> Result<GovscanConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: GovscanConfig = toml::from_str(&contents)
        .map_err(|e| ScanError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config
        .validate()
        .map_err(|e| ScanError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ScanError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Don't process env vars in comments
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ScanError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ScanError::Configuration(format!("Invalid {name} value '{value}'")))
}

/// Applies environment variable overrides using GOVSCAN_* prefix
///
/// Environment variables follow the pattern: GOVSCAN_<SECTION>_<KEY>
/// For example: GOVSCAN_ARTIFACTS_DIRECTORY, GOVSCAN_SCAN_TIMEOUT_SECONDS
fn apply_env_overrides(config: &mut GovscanConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("GOVSCAN_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Artifact overrides
    if let Ok(val) = std::env::var("GOVSCAN_ARTIFACTS_DIRECTORY") {
        config.artifacts.directory = val.into();
    }
    if let Ok(val) = std::env::var("GOVSCAN_ARTIFACTS_VECTORIZER_FILE") {
        config.artifacts.vectorizer_file = val;
    }
    if let Ok(val) = std::env::var("GOVSCAN_ARTIFACTS_MODEL_FILE") {
        config.artifacts.model_file = val;
    }
    if let Ok(val) = std::env::var("GOVSCAN_ARTIFACTS_LABEL_MAPPING_FILE") {
        config.artifacts.label_mapping_file = val;
    }

    // Detection and audit overrides
    config
        .detection
        .apply_env_overrides()
        .map_err(|e| ScanError::Configuration(format!("{e:#}")))?;

    // Scan overrides
    if let Ok(val) = std::env::var("GOVSCAN_SCAN_TIMEOUT_SECONDS") {
        config.scan.timeout_seconds = parse_env("GOVSCAN_SCAN_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("GOVSCAN_SCAN_OUTPUT_DIRECTORY") {
        config.scan.output_directory = Some(val.into());
    }
    if let Ok(val) = std::env::var("GOVSCAN_SCAN_OUTPUT_FORMAT") {
        config.scan.output_format = val.parse().map_err(ScanError::Configuration)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("GOVSCAN_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("GOVSCAN_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("GOVSCAN_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("GOVSCAN_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
