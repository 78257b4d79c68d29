//! Action workflow for the selected patient
//!
//! Transient, per-session state: which patient is selected, which action has
//! been chosen and which medicines are ticked. Every durable effect goes
//! through the [`Clinic`]; this type only decides when an effect is allowed.

use super::action::{Action, ActionState};
use super::notification::NotificationKind;
use crate::core::clinic::Clinic;
use crate::domain::{MedicineId, Patient, PatientId, Result, TriageError};

/// State machine driving one patient from selection to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionWorkflow {
    patient: Option<PatientId>,
    state: ActionState,
    medicines: Vec<MedicineId>,
}

impl ActionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_patient(&self) -> Option<PatientId> {
        self.patient
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    /// Medicines ticked in this session
    pub fn selected_medicines(&self) -> &[MedicineId] {
        &self.medicines
    }

    /// Selects a patient, resetting the action
    ///
    /// The medicine selection is seeded from what the patient already has.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::NotFound`] if the patient is not pending.
    pub fn select(&mut self, clinic: &Clinic, patient_id: PatientId) -> Result<()> {
        let patient = clinic.get_patient(patient_id)?;

        self.patient = Some(patient_id);
        self.state = ActionState::NoAction;
        self.medicines = patient.selected_medicines().to_vec();

        tracing::debug!(patient_id = %patient_id, "Patient selected");
        Ok(())
    }

    /// Chooses what to do for the selected patient
    ///
    /// Any action other than a prescription clears the medicines ticked in
    /// this session. Video calls and referrals post a notification.
    pub fn choose_action(&mut self, clinic: &mut Clinic, action: Action) -> Result<()> {
        let name = self.current(clinic)?.name().to_string();

        self.state = ActionState::ActionChosen(action);
        if action != Action::MedicinePrescription {
            self.medicines.clear();
        }

        match action {
            Action::VideoCall => {
                clinic.notifications_mut().post(
                    NotificationKind::VideoCall,
                    format!("Video call initiated for {name}"),
                    Vec::new(),
                );
            }
            Action::ReferToHospital => {
                clinic.notifications_mut().post(
                    NotificationKind::Referral,
                    format!("{name} referred to hospital for advanced treatment"),
                    Vec::new(),
                );
            }
            Action::MedicinePrescription => {}
        }
        Ok(())
    }

    /// Ticks or unticks a medicine and persists the selection
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Precondition`] unless a prescription is the
    /// chosen action, and [`TriageError::NotFound`] for a medicine missing
    /// from the catalog.
    pub fn toggle_medicine(&mut self, clinic: &mut Clinic, medicine_id: MedicineId) -> Result<()> {
        let patient_id = self.current(clinic)?.id();

        if self.state != ActionState::ActionChosen(Action::MedicinePrescription) {
            return Err(TriageError::Precondition(
                "Medicines can only be chosen for a medicine prescription".to_string(),
            ));
        }
        if clinic.catalog().medicine(medicine_id).is_none() {
            return Err(TriageError::NotFound(format!("Medicine {}", medicine_id)));
        }

        if let Some(index) = self.medicines.iter().position(|m| *m == medicine_id) {
            self.medicines.remove(index);
        } else {
            self.medicines.push(medicine_id);
        }

        clinic.set_selected_medicines(patient_id, &self.medicines)
    }

    /// At least one medicine ticked and the prescription not yet printed
    pub fn can_print(&self, clinic: &Clinic) -> bool {
        match self.current(clinic) {
            Ok(patient) => !self.medicines.is_empty() && !patient.prescription_printed(),
            Err(_) => false,
        }
    }

    /// Prints the prescription
    ///
    /// Returns `false` without doing anything if it was already printed.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Precondition`] when no medicine is ticked.
    pub fn print_prescription(&mut self, clinic: &mut Clinic) -> Result<bool> {
        let patient = self.current(clinic)?;
        if patient.prescription_printed() {
            return Ok(false);
        }
        if self.medicines.is_empty() {
            return Err(TriageError::Precondition(
                "Select at least one medicine before printing".to_string(),
            ));
        }

        let patient_id = patient.id();
        let name = patient.name().to_string();
        let medicine_names: Vec<String> = clinic
            .catalog()
            .medicines()
            .iter()
            .filter(|m| self.medicines.contains(&m.id))
            .map(|m| m.name.clone())
            .collect();

        clinic.mark_prescription_printed(patient_id)?;

        tracing::info!(
            patient_id = %patient_id,
            medicines = ?medicine_names,
            "Prescription printed"
        );
        clinic.notifications_mut().post(
            NotificationKind::PrescriptionPrinted,
            format!("Prescription printed for {name}"),
            medicine_names,
        );
        Ok(true)
    }

    /// Whether the chosen action allows closing the case
    ///
    /// A prescription needs a ticked medicine and a printed prescription;
    /// a video call or referral is enough on its own.
    pub fn can_mark_done(&self, clinic: &Clinic) -> bool {
        let Ok(patient) = self.current(clinic) else {
            return false;
        };
        match self.state {
            ActionState::ActionChosen(Action::MedicinePrescription) => {
                !self.medicines.is_empty() && patient.prescription_printed()
            }
            ActionState::ActionChosen(Action::VideoCall | Action::ReferToHospital) => true,
            ActionState::NoAction => false,
        }
    }

    /// Closes the case and removes the patient from the queue
    ///
    /// Resets the workflow to no selection.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Precondition`] if [`Self::can_mark_done`] is false.
    pub fn mark_done(&mut self, clinic: &mut Clinic) -> Result<Patient> {
        let patient_id = self.current(clinic)?.id();
        let action = match self.state.action() {
            Some(action) if self.can_mark_done(clinic) => action,
            _ => {
                return Err(TriageError::Precondition(
                    "Patient cannot be marked as done before the chosen action is complete"
                        .to_string(),
                ))
            }
        };

        let patient = clinic.complete(patient_id, action)?;
        clinic.notifications_mut().post(
            NotificationKind::Completed,
            format!(
                "Patient {} marked as done and removed from queue",
                patient.name()
            ),
            Vec::new(),
        );

        self.clear();
        Ok(patient)
    }

    /// Drops the selection
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn current<'c>(&self, clinic: &'c Clinic) -> Result<&'c Patient> {
        let patient_id = self
            .patient
            .ok_or_else(|| TriageError::Precondition("No patient selected".to_string()))?;
        clinic.get_patient(patient_id)
    }
}
