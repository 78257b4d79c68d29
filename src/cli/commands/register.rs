//! Register command implementation
//!
//! This module implements the `register` command used by front-desk staff.

use crate::cli::{open_clinic, report_error};
use crate::domain::{DoctorId, Priority, RegistrationRequest};
use clap::Args;

/// Arguments for the register command
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Patient name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Age in years (1-120)
    #[arg(long, allow_negative_numbers = true)]
    pub age: Option<i64>,

    /// Symptoms or reason for visit
    #[arg(long, default_value = "")]
    pub details: String,

    /// Priority (High, Medium, Low) [default: Medium]
    #[arg(long)]
    pub priority: Option<Priority>,

    /// Doctor id to assign
    #[arg(long)]
    pub doctor: Option<DoctorId>,

    /// Skip the simulated submission delay
    #[arg(long)]
    pub no_delay: bool,
}

impl RegisterArgs {
    /// Form contents as a registration request
    pub fn to_request(&self) -> RegistrationRequest {
        RegistrationRequest {
            name: self.name.clone(),
            age: self.age,
            details: self.details.clone(),
            priority: self.priority,
            doctor_id: self.doctor,
        }
    }

    /// Execute the register command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let mut clinic = match open_clinic(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let request = self.to_request();
        let result = if self.no_delay {
            clinic.register(&request)
        } else {
            println!("⏳ Registering patient...");
            clinic.submit_registration(&request).await
        };

        match result {
            Ok(registration) => {
                println!("✅ {}", registration.message);
                println!("   Patient ID: {}", registration.patient.id());
                Ok(0)
            }
            Err(e) => Ok(report_error("Registration failed", &e)),
        }
    }
}
