//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the triage desk using clap.

pub mod commands;

use crate::config::{load_config, load_config_or_default, TriageConfig};
use crate::core::clinic::Clinic;
use crate::domain::{Result, TriageError};
use clap::{Parser, Subcommand};

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "triage.toml";

/// Triage - clinic front desk and doctor queue
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(version, about, long_about = None)]
#[command(author = "Triage Contributors")]
pub struct Cli {
    /// Path to configuration file [default: triage.toml]
    #[arg(short, long, env = "TRIAGE_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRIAGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration path, explicit or default
    pub fn config_path(&self) -> &str {
        self.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// List doctors
    Doctors(commands::catalog::DoctorsArgs),

    /// List medicines
    Medicines(commands::catalog::MedicinesArgs),

    /// Add a doctor to the catalog
    AddDoctor(commands::catalog::AddDoctorArgs),

    /// Add a medicine to the catalog
    AddMedicine(commands::catalog::AddMedicineArgs),

    /// Register a patient and assign a doctor
    Register(commands::register::RegisterArgs),

    /// Show a doctor's pending queue
    Queue(commands::queue::QueueArgs),

    /// Record an action for a patient and optionally close the case
    Attend(commands::attend::AttendArgs),

    /// Remove a patient without recording a completion
    Remove(commands::attend::RemoveArgs),

    /// Show pending counts per doctor
    Status(commands::status::StatusArgs),
}

/// Loads configuration for a command
///
/// An explicitly named file must exist. Without one, a missing
/// `triage.toml` falls back to defaults.
pub fn load_cli_config(config_path: Option<&str>) -> Result<TriageConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => load_config_or_default(DEFAULT_CONFIG_PATH),
    }
}

/// Maps an error to the process exit code
///
/// 1 for rejected commands, 2 for configuration errors, 5 for everything else.
pub fn exit_code_for(error: &TriageError) -> i32 {
    match error {
        TriageError::Configuration(_) => 2,
        e if e.is_rejection() => 1,
        _ => 5,
    }
}

/// Loads configuration and opens the clinic, printing any failure
///
/// Returns the exit code to use when opening failed.
pub(crate) fn open_clinic(config_path: Option<&str>) -> std::result::Result<Clinic, i32> {
    let config = match load_cli_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            return Err(2);
        }
    };

    match Clinic::open(config) {
        Ok(clinic) => Ok(clinic),
        Err(e) => {
            println!("❌ Failed to open clinic data");
            println!("   Error: {e}");
            Err(exit_code_for(&e))
        }
    }
}

/// Prints a rejected command and returns its exit code
pub(crate) fn report_error(context: &str, error: &TriageError) -> i32 {
    println!("❌ {context}");
    match error {
        TriageError::Validation(errors) => {
            for field_error in errors.iter() {
                println!("   {}: {}", field_error.field, field_error.message);
            }
        }
        other => println!("   Error: {other}"),
    }
    exit_code_for(error)
}
