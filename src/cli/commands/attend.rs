//! Attend and remove command implementations
//!
//! `attend` drives the action workflow for a single patient in one go:
//! select, choose an action, tick medicines, print, and close the case.

use crate::cli::{open_clinic, report_error};
use crate::core::clinic::Clinic;
use crate::core::workflow::{Action, ActionWorkflow};
use crate::domain::{MedicineId, PatientId};
use clap::Args;

/// Arguments for the attend command
#[derive(Args, Debug)]
pub struct AttendArgs {
    /// Patient id
    pub patient: PatientId,

    /// Action: video-call, refer, prescription
    #[arg(long)]
    pub action: Action,

    /// Tick a medicine (prescription only, repeatable)
    #[arg(long = "medicine")]
    pub medicines: Vec<MedicineId>,

    /// Untick a medicine (prescription only, repeatable)
    #[arg(long = "drop-medicine")]
    pub drop_medicines: Vec<MedicineId>,

    /// Print the prescription
    #[arg(long)]
    pub print: bool,

    /// Mark the patient as done and remove them from the queue
    #[arg(long)]
    pub done: bool,
}

impl AttendArgs {
    /// Execute the attend command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let mut clinic = match open_clinic(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let code = self.run(&mut clinic);
        for notification in clinic.notifications_mut().active() {
            println!("🔔 {}", notification.message);
            for medicine in &notification.medicines {
                println!("   - {medicine}");
            }
        }
        Ok(code)
    }

    fn run(&self, clinic: &mut Clinic) -> i32 {
        let mut workflow = ActionWorkflow::new();

        if let Err(e) = workflow.select(clinic, self.patient) {
            return report_error("Failed to select patient", &e);
        }
        if let Err(e) = workflow.choose_action(clinic, self.action) {
            return report_error("Failed to choose action", &e);
        }

        // Ticking is idempotent here even though the workflow toggles
        for medicine in &self.medicines {
            if workflow.selected_medicines().contains(medicine) {
                continue;
            }
            if let Err(e) = workflow.toggle_medicine(clinic, *medicine) {
                return report_error("Failed to select medicine", &e);
            }
        }
        for medicine in &self.drop_medicines {
            if !workflow.selected_medicines().contains(medicine) {
                continue;
            }
            if let Err(e) = workflow.toggle_medicine(clinic, *medicine) {
                return report_error("Failed to deselect medicine", &e);
            }
        }

        if self.print {
            match workflow.print_prescription(clinic) {
                Ok(true) => {}
                Ok(false) => println!("ℹ️  Prescription was already printed"),
                Err(e) => return report_error("Failed to print prescription", &e),
            }
        }

        if self.done {
            if let Err(e) = workflow.mark_done(clinic) {
                return report_error("Failed to mark patient as done", &e);
            }
        } else if workflow.can_mark_done(clinic) {
            println!("ℹ️  Patient can now be marked as done (--done)");
        }

        0
    }
}

/// Arguments for the remove command
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Patient id
    pub patient: PatientId,
}

impl RemoveArgs {
    /// Execute the remove command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let mut clinic = match open_clinic(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        match clinic.remove(self.patient) {
            Ok(Some(patient)) => {
                println!("✅ Patient {} removed from the queue", patient.name());
                Ok(0)
            }
            Ok(None) => {
                println!("ℹ️  No pending patient with id {}", self.patient);
                Ok(0)
            }
            Err(e) => Ok(report_error("Failed to remove patient", &e)),
        }
    }
}
