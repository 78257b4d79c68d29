//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all) yields a
//! working configuration.

use crate::domain::ids::{DoctorId, MedicineId};
use serde::{Deserialize, Serialize};

/// Persistence backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file on local disk
    #[default]
    File,
    /// Process memory only, nothing survives exit
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Main triage configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Persistence settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Queue view settings
    #[serde(default)]
    pub queue: QueueConfig,

    /// Action workflow timing
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Extra catalog entries appended to the built-in seed
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Completion audit log
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TriageConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.queue.validate()?;
        self.workflow.validate()?;
        self.catalog.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend kind
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path of the JSON store file (file backend only)
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Key under which the patient collection is stored
    #[serde(default = "default_namespace_key")]
    pub namespace_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
            namespace_key: default_namespace_key(),
        }
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backend == StorageBackend::File && self.path.trim().is_empty() {
            return Err("storage.path is required when storage.backend = 'file'".to_string());
        }
        if self.namespace_key.trim().is_empty() {
            return Err("storage.namespace_key cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Queue view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Quiescence window before a new search term takes effect
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

impl QueueConfig {
    fn validate(&self) -> Result<(), String> {
        if self.search_debounce_ms > 5_000 {
            return Err("queue.search_debounce_ms must be <= 5000".to_string());
        }
        Ok(())
    }
}

/// Action workflow timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Simulated submission latency before a registration is committed
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,

    /// Lifetime of video call, referral and completion notifications
    #[serde(default = "default_notification_ttl_ms")]
    pub notification_ttl_ms: u64,

    /// Lifetime of the prescription printed notification
    #[serde(default = "default_print_notification_ttl_ms")]
    pub print_notification_ttl_ms: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            notification_ttl_ms: default_notification_ttl_ms(),
            print_notification_ttl_ms: default_print_notification_ttl_ms(),
        }
    }
}

impl WorkflowConfig {
    fn validate(&self) -> Result<(), String> {
        if self.submit_delay_ms > 10_000 {
            return Err("workflow.submit_delay_ms must be <= 10000".to_string());
        }
        if self.notification_ttl_ms == 0 || self.print_notification_ttl_ms == 0 {
            return Err("workflow notification lifetimes must be > 0".to_string());
        }
        Ok(())
    }
}

/// Extra doctor entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorEntry {
    pub id: DoctorId,
    pub name: String,
    #[serde(default)]
    pub specialization: String,
}

/// Extra medicine entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineEntry {
    pub id: MedicineId,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Catalog extensions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub doctors: Vec<DoctorEntry>,

    #[serde(default)]
    pub medicines: Vec<MedicineEntry>,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(entry) = self.doctors.iter().find(|d| d.name.trim().is_empty()) {
            return Err(format!("catalog.doctors entry {} has an empty name", entry.id));
        }
        if let Some(entry) = self.medicines.iter().find(|m| m.name.trim().is_empty()) {
            return Err(format!(
                "catalog.medicines entry {} has an empty name",
                entry.id
            ));
        }
        Ok(())
    }
}

/// Completion audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Append a record for every completed case
    #[serde(default)]
    pub enabled: bool,

    /// JSON lines file
    #[serde(default = "default_audit_path")]
    pub path: String,

    /// Store a SHA-256 of the patient name instead of the name itself
    #[serde(default = "default_true")]
    pub hash_patient_names: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_audit_path(),
            hash_patient_names: true,
        }
    }
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.path.trim().is_empty() {
            return Err("audit.path is required when audit.enabled = true".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_storage_path() -> String {
    "triage-data.json".to_string()
}

fn default_namespace_key() -> String {
    "triage:patients".to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_submit_delay_ms() -> u64 {
    1000
}

fn default_notification_ttl_ms() -> u64 {
    3000
}

fn default_print_notification_ttl_ms() -> u64 {
    4000
}

fn default_audit_path() -> String {
    "triage-audit.jsonl".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
