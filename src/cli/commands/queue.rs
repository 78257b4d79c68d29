//! Queue command implementation
//!
//! This module implements the `queue` command showing one doctor's pending
//! patients, most urgent first.

use crate::cli::open_clinic;
use crate::core::clinic::Clinic;
use crate::core::queue::SearchDebouncer;
use crate::domain::{Doctor, DoctorId, Patient};
use clap::Args;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Arguments for the queue command
#[derive(Args, Debug)]
pub struct QueueArgs {
    /// Doctor whose queue to show
    #[arg(long)]
    pub doctor: Option<DoctorId>,

    /// Only patients whose name contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Keep reading search terms from stdin, one per line, and reprint the
    /// queue once a term has settled
    #[arg(long)]
    pub follow: bool,
}

impl QueueArgs {
    /// Execute the queue command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let clinic = match open_clinic(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let Some(doctor_id) = self.doctor else {
            println!("Please select a doctor with --doctor to view the patient queue.");
            return Ok(1);
        };
        let Some(doctor) = clinic.catalog().doctor(doctor_id) else {
            println!("❌ Doctor not found: {doctor_id}");
            return Ok(1);
        };

        let initial = self.search.clone().unwrap_or_default();
        self.render(&clinic, doctor, &initial)?;

        if self.follow {
            self.follow_search(&clinic, doctor, initial).await?;
        }
        Ok(0)
    }

    async fn follow_search(
        &self,
        clinic: &Clinic,
        doctor: &Doctor,
        initial: String,
    ) -> anyhow::Result<()> {
        let window = Duration::from_millis(clinic.config().queue.search_debounce_ms);
        let debouncer = SearchDebouncer::starting_with(window, initial);
        let mut effective = debouncer.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        tracing::debug!(window_ms = window.as_millis() as u64, "Following queue search input");

        let mut input_open = true;
        while input_open {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(term) => debouncer.set_term(term),
                    None => input_open = false,
                },
                changed = effective.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let term = effective.borrow_and_update().clone();
                    println!();
                    self.render(clinic, doctor, &term)?;
                }
            }
        }
        Ok(())
    }

    fn render(&self, clinic: &Clinic, doctor: &Doctor, search: &str) -> anyhow::Result<()> {
        let queue = clinic.list_pending_for_doctor(Some(doctor.id), Some(search));

        if self.json {
            println!("{}", serde_json::to_string_pretty(&queue)?);
            return Ok(());
        }

        println!("🩺 Patient queue - {} ({})", doctor.name, doctor.specialization);
        let term = search.trim();
        if !term.is_empty() {
            println!("   Search: \"{term}\"");
        }
        println!();

        if queue.is_empty() {
            println!("No pending patients.");
            return Ok(());
        }

        println!(
            "{:<15} {:<24} {:<5} {:<8} {:<12} {}",
            "ID", "Name", "Age", "Priority", "Medicines", "Details"
        );
        println!("{}", "-".repeat(90));
        for patient in &queue {
            print_row(patient, &clinic.catalog().medicine_names(patient.selected_medicines()));
        }
        println!();
        println!("{} pending patient(s)", queue.len());
        Ok(())
    }
}

fn print_row(patient: &Patient, medicine_names: &[String]) {
    let medicines = if medicine_names.is_empty() {
        "-".to_string()
    } else if patient.prescription_printed() {
        format!("{} (printed)", medicine_names.len())
    } else {
        medicine_names.len().to_string()
    };

    println!(
        "{:<15} {:<24} {:<5} {:<8} {:<12} {}",
        patient.id(),
        patient.name(),
        patient.age(),
        patient.priority(),
        medicines,
        patient.details()
    );
}
