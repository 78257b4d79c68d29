//! Configuration management for the triage desk.
//!
//! Configuration lives in a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `TRIAGE_*` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use triage::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("triage.toml")?;
//! println!("Patients stored in: {}", config.storage.path);
//! println!("Search debounce: {} ms", config.queue.search_debounce_ms);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [storage]
//! backend = "file"
//! path = "${TRIAGE_DATA_DIR}/triage-data.json"
//! namespace_key = "triage:patients"
//!
//! [queue]
//! search_debounce_ms = 300
//!
//! [workflow]
//! submit_delay_ms = 1000
//! notification_ttl_ms = 3000
//! print_notification_ttl_ms = 4000
//!
//! [[catalog.doctors]]
//! id = 6
//! name = "Dr. Moore"
//! specialization = "Neuro-Ophthalmology"
//!
//! [audit]
//! enabled = true
//! path = "triage-audit.jsonl"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    ApplicationConfig, AuditConfig, CatalogConfig, DoctorEntry, LoggingConfig, MedicineEntry,
    QueueConfig, StorageBackend, StorageConfig, TriageConfig, WorkflowConfig,
};
