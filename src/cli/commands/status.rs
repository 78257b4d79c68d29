//! Status command implementation
//!
//! This module implements the `status` command for displaying pending
//! counts per doctor and the outcome of the last load.

use crate::cli::open_clinic;
use crate::core::queue::pending_by_doctor;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Hide doctors with an empty queue
    #[arg(long)]
    pub busy_only: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!("Checking queue status");

        println!("📊 Queue Status");
        println!();

        let clinic = match open_clinic(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let report = clinic.load_report();
        println!(
            "Storage: {} (key '{}')",
            clinic.config().storage.backend,
            clinic.registry().namespace_key()
        );
        println!("Restored patients: {}", report.restored);
        if report.dropped > 0 {
            println!("⚠️  Dropped records: {}", report.dropped);
        }
        if report.unreadable {
            println!("⚠️  Stored collection was unreadable and has been ignored");
        }
        if let Some(aside) = &report.quarantined {
            println!("   Unreadable store file moved to {}", aside.display());
        }
        println!();

        let loads: Vec<_> = pending_by_doctor(clinic.registry().patients(), clinic.list_doctors())
            .into_iter()
            .filter(|l| !self.busy_only || l.pending > 0)
            .collect();

        if loads.is_empty() {
            println!("No pending patients.");
            return Ok(0);
        }

        println!("{:<6} {:<25} {:<10}", "ID", "Doctor", "Pending");
        println!("{}", "-".repeat(45));
        for load in loads {
            println!(
                "{:<6} {:<25} {:<10}",
                load.doctor_id, load.doctor_name, load.pending
            );
        }
        println!();
        Ok(0)
    }
}
