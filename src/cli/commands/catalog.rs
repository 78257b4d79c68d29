//! Catalog command implementations
//!
//! `doctors` and `medicines` list the reference data. `add-doctor` and
//! `add-medicine` validate a new entry against the current catalog and append
//! it to the configuration file, since the catalog itself is reseeded on
//! every run.

use crate::cli::{open_clinic, report_error, DEFAULT_CONFIG_PATH};
use crate::config::{DoctorEntry, MedicineEntry};
use crate::domain::{Doctor, DoctorId, Medicine, MedicineId, TriageError};
use clap::Args;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;

/// Arguments for the doctors command
#[derive(Args, Debug)]
pub struct DoctorsArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl DoctorsArgs {
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let clinic = match open_clinic(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(clinic.list_doctors())?);
            return Ok(0);
        }

        println!("{:<6} {:<20} {:<30}", "ID", "Name", "Specialization");
        println!("{}", "-".repeat(56));
        for doctor in clinic.list_doctors() {
            println!(
                "{:<6} {:<20} {:<30}",
                doctor.id, doctor.name, doctor.specialization
            );
        }
        Ok(0)
    }
}

/// Arguments for the medicines command
#[derive(Args, Debug)]
pub struct MedicinesArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl MedicinesArgs {
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let clinic = match open_clinic(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(clinic.list_medicines())?);
            return Ok(0);
        }

        println!("{:<6} {:<28} {:<20}", "ID", "Name", "Type");
        println!("{}", "-".repeat(54));
        for medicine in clinic.list_medicines() {
            println!("{:<6} {:<28} {:<20}", medicine.id, medicine.name, medicine.kind);
        }
        Ok(0)
    }
}

/// Arguments for the add-doctor command
#[derive(Args, Debug)]
pub struct AddDoctorArgs {
    /// Doctor name
    #[arg(long)]
    pub name: String,

    /// Specialization
    #[arg(long, default_value = "")]
    pub specialization: String,

    /// Id to use [default: one above the highest existing id]
    #[arg(long)]
    pub id: Option<DoctorId>,
}

impl AddDoctorArgs {
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let mut clinic = match open_clinic(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let id = self.id.unwrap_or_else(|| clinic.catalog().next_doctor_id());
        let added = Doctor::new(id, self.name.trim(), self.specialization.trim())
            .map_err(TriageError::Precondition)
            .and_then(|doctor| clinic.add_doctor(doctor.clone()).map(|_| doctor));

        let doctor = match added {
            Ok(d) => d,
            Err(e) => return Ok(report_error("Failed to add doctor", &e)),
        };

        let entry = DoctorEntry {
            id: doctor.id,
            name: doctor.name.clone(),
            specialization: doctor.specialization.clone(),
        };
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        if let Err(e) = append_entry(path, "catalog.doctors", &entry) {
            return Ok(report_error("Failed to update configuration file", &e));
        }

        println!("✅ Doctor {} added with id {}", doctor.name, doctor.id);
        Ok(0)
    }
}

/// Arguments for the add-medicine command
#[derive(Args, Debug)]
pub struct AddMedicineArgs {
    /// Medicine name
    #[arg(long)]
    pub name: String,

    /// Therapeutic class
    #[arg(long = "type", default_value = "")]
    pub kind: String,

    /// Id to use [default: one above the highest existing id]
    #[arg(long)]
    pub id: Option<MedicineId>,
}

impl AddMedicineArgs {
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let mut clinic = match open_clinic(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let id = self
            .id
            .unwrap_or_else(|| clinic.catalog().next_medicine_id());
        let added = Medicine::new(id, self.name.trim(), self.kind.trim())
            .map_err(TriageError::Precondition)
            .and_then(|medicine| clinic.add_medicine(medicine.clone()).map(|_| medicine));

        let medicine = match added {
            Ok(m) => m,
            Err(e) => return Ok(report_error("Failed to add medicine", &e)),
        };

        let entry = MedicineEntry {
            id: medicine.id,
            name: medicine.name.clone(),
            kind: medicine.kind.clone(),
        };
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        if let Err(e) = append_entry(path, "catalog.medicines", &entry) {
            return Ok(report_error("Failed to update configuration file", &e));
        }

        println!("✅ Medicine {} added with id {}", medicine.name, medicine.id);
        Ok(0)
    }
}

/// Appends `entry` to the configuration file as an array-of-tables item
fn append_entry(path: &str, table: &str, entry: &impl Serialize) -> crate::domain::Result<()> {
    let body = toml::to_string(entry)
        .map_err(|e| TriageError::Serialization(format!("Failed to encode entry: {e}")))?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write!(file, "\n[[{table}]]\n{body}")?;

    tracing::info!(path = %path, table = %table, "Catalog entry appended to configuration");
    Ok(())
}
