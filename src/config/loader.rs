//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{StorageBackend, TriageConfig};
use crate::domain::errors::TriageError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TriageConfig
/// 4. Applies environment variable overrides (TRIAGE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use triage::config::loader::load_config;
///
/// let config = load_config("triage.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TriageConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TriageError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TriageError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration, falling back to defaults when the file is absent
///
/// Used for the implicit default path: a clinic can run without a config
/// file. Overrides and validation still apply to the defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<TriageConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = TriageConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration from TOML text
pub fn parse_config(contents: &str) -> Result<TriageConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: TriageConfig = toml::from_str(&contents)
        .map_err(|e| TriageError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &TriageConfig) -> Result<()> {
    config.validate().map_err(|e| {
        TriageError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TriageError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        // Comments are copied verbatim
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
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(TriageError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the TRIAGE_* prefix
///
/// Environment variables follow the pattern: TRIAGE_<SECTION>_<KEY>,
/// for example TRIAGE_STORAGE_PATH or TRIAGE_QUEUE_SEARCH_DEBOUNCE_MS.
fn apply_env_overrides(config: &mut TriageConfig) -> Result<()> {
    if let Ok(val) = std::env::var("TRIAGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Storage overrides
    if let Ok(val) = std::env::var("TRIAGE_STORAGE_BACKEND") {
        config.storage.backend = match val.to_lowercase().as_str() {
            "file" => StorageBackend::File,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(TriageError::Configuration(format!(
                    "Invalid TRIAGE_STORAGE_BACKEND '{other}'. Must be one of: file, memory"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("TRIAGE_STORAGE_PATH") {
        config.storage.path = val;
    }
    if let Ok(val) = std::env::var("TRIAGE_STORAGE_NAMESPACE_KEY") {
        config.storage.namespace_key = val;
    }

    // Timing overrides
    if let Ok(val) = std::env::var("TRIAGE_QUEUE_SEARCH_DEBOUNCE_MS") {
        if let Ok(ms) = val.parse() {
            config.queue.search_debounce_ms = ms;
        }
    }
    if let Ok(val) = std::env::var("TRIAGE_WORKFLOW_SUBMIT_DELAY_MS") {
        if let Ok(ms) = val.parse() {
            config.workflow.submit_delay_ms = ms;
        }
    }

    // Audit overrides
    if let Ok(val) = std::env::var("TRIAGE_AUDIT_ENABLED") {
        config.audit.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TRIAGE_AUDIT_PATH") {
        config.audit.path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("TRIAGE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TRIAGE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
