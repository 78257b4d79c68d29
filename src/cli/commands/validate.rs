//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the triage configuration file.

use crate::cli::load_cli_config;
use crate::config::StorageBackend;
use crate::core::catalog::CatalogStore;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown_path = config_path.unwrap_or(crate::cli::DEFAULT_CONFIG_PATH);
        tracing::info!(config_path = %shown_path, "Validating configuration");

        println!("🔍 Validating configuration file: {shown_path}");
        println!();

        // Loading runs validation
        let config = match load_cli_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        // Extra catalog entries must not collide with the seed
        let catalog = match CatalogStore::from_config(&config.catalog) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Catalog entries are invalid");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        match config.storage.backend {
            StorageBackend::File => println!("  Storage: file ({})", config.storage.path),
            StorageBackend::Memory => println!("  Storage: memory"),
        }
        println!("  Namespace Key: {}", config.storage.namespace_key);
        println!("  Search Debounce: {} ms", config.queue.search_debounce_ms);
        println!("  Submit Delay: {} ms", config.workflow.submit_delay_ms);
        println!(
            "  Notifications: {} ms ({} ms for prescriptions)",
            config.workflow.notification_ttl_ms, config.workflow.print_notification_ttl_ms
        );
        println!("  Doctors: {}", catalog.doctors().len());
        println!("  Medicines: {}", catalog.medicines().len());
        if config.audit.enabled {
            println!("  Audit Log: {}", config.audit.path);
        } else {
            println!("  Audit Log: disabled");
        }
        println!();
        Ok(0)
    }
}
