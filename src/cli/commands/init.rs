//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "triage.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing triage configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: triage validate-config");
                println!("  3. Register a patient: triage register --name \"Jane Doe\" --age 34 --details \"Blurred vision\" --doctor 1");
                println!("  4. Show the queue: triage queue --doctor 1");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Triage Configuration File

[application]
log_level = "info"

[storage]
backend = "file"
path = "triage-data.json"
namespace_key = "triage:patients"

[queue]
search_debounce_ms = 300

[workflow]
submit_delay_ms = 1000
notification_ttl_ms = 3000
print_notification_ttl_ms = 4000

[audit]
enabled = false
path = "triage-audit.jsonl"
hash_patient_names = true

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Triage Configuration File
#
# Every value below is the default. Values may reference environment
# variables with ${VAR_NAME}, and any key can be overridden with
# TRIAGE_<SECTION>_<KEY>, e.g. TRIAGE_STORAGE_PATH.

[application]
# Log level: trace | debug | info | warn | error
log_level = "info"

[storage]
# Where the patient collection is kept: file | memory
backend = "file"

# JSON store file (file backend only)
path = "triage-data.json"

# Key under which the patient collection is stored
namespace_key = "triage:patients"

[queue]
# A search term takes effect once typing has paused this long
search_debounce_ms = 300

[workflow]
# Simulated submission latency for registrations
submit_delay_ms = 1000

# Lifetime of video call, referral and completion notifications
notification_ttl_ms = 3000

# Lifetime of the prescription printed notification
print_notification_ttl_ms = 4000

# Extra catalog entries, appended to the built-in doctors and medicines.
# Ids must not collide with the built-in ones (doctors 1-5, medicines 1-8).
#
# [[catalog.doctors]]
# id = 6
# name = "Dr. Moore"
# specialization = "Neuro-Ophthalmology"
#
# [[catalog.medicines]]
# id = 9
# name = "Atropine Eye Drops"
# type = "Mydriatic"

[audit]
# Append a JSON line for every completed case
enabled = false
path = "triage-audit.jsonl"

# Store a SHA-256 of the patient name instead of the name
hash_patient_names = true

[logging]
# Enable local JSON log files
local_enabled = false

# Local log directory
local_path = "logs"

# Log rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
