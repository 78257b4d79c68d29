//! Clinic application state
//!
//! Ties the catalog, the patient registry, the notification center and the
//! audit log together behind the command surface used by the CLI and by the
//! action workflow.

use crate::adapters::storage::{create_store, KeyValueStore};
use crate::config::TriageConfig;
use crate::core::audit::CompletionAuditLog;
use crate::core::catalog::CatalogStore;
use crate::core::queue::list_pending_for_doctor;
use crate::core::registry::{LoadReport, PatientRegistry};
use crate::core::workflow::{Action, NotificationCenter};
use crate::domain::{
    Doctor, DoctorId, Medicine, MedicineId, Patient, PatientId, RegistrationRequest, Result,
    TriageError,
};
use std::sync::Arc;
use std::time::Duration;

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub patient: Patient,
    /// Confirmation shown to front-desk staff
    pub message: String,
}

/// Application state of one clinic session
pub struct Clinic {
    config: TriageConfig,
    catalog: CatalogStore,
    registry: PatientRegistry,
    notifications: NotificationCenter,
    audit: Option<CompletionAuditLog>,
    load_report: LoadReport,
}

impl std::fmt::Debug for Clinic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clinic")
            .field("doctors", &self.catalog.doctors().len())
            .field("medicines", &self.catalog.medicines().len())
            .field("registry", &self.registry)
            .field("audit", &self.audit.as_ref().map(|a| a.path().to_path_buf()))
            .finish()
    }
}

impl Clinic {
    /// Opens the clinic with the storage backend named in `config`
    ///
    /// Seeds the catalog, appends configured entries and restores the
    /// persisted patients.
    pub fn open(config: TriageConfig) -> Result<Self> {
        let store = create_store(&config.storage)?;
        Self::with_store(config, store)
    }

    /// Opens the clinic on an explicit store
    pub fn with_store(config: TriageConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let catalog = CatalogStore::from_config(&config.catalog)?;
        let (registry, load_report) =
            PatientRegistry::load(store, &config.storage.namespace_key, |id| {
                catalog.has_doctor(id)
            })?;
        let audit = CompletionAuditLog::from_config(&config.audit)?;
        let notifications = NotificationCenter::from_config(&config.workflow);

        if !load_report.is_clean() {
            tracing::warn!(
                dropped = load_report.dropped,
                unreadable = load_report.unreadable,
                "Some persisted patients could not be restored"
            );
        }

        Ok(Self {
            config,
            catalog,
            registry,
            notifications,
            audit,
            load_report,
        })
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn registry(&self) -> &PatientRegistry {
        &self.registry
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn audit_log(&self) -> Option<&CompletionAuditLog> {
        self.audit.as_ref()
    }

    pub fn list_doctors(&self) -> &[Doctor] {
        self.catalog.doctors()
    }

    pub fn list_medicines(&self) -> &[Medicine] {
        self.catalog.medicines()
    }

    /// Appends a doctor to this session's catalog
    pub fn add_doctor(&mut self, doctor: Doctor) -> Result<()> {
        self.catalog.add_doctor(doctor)
    }

    /// Appends a medicine to this session's catalog
    pub fn add_medicine(&mut self, medicine: Medicine) -> Result<()> {
        self.catalog.add_medicine(medicine)
    }

    /// Registers a patient immediately
    pub fn register(&mut self, request: &RegistrationRequest) -> Result<Registration> {
        let catalog = &self.catalog;
        let patient = self
            .registry
            .register(request, |id| catalog.has_doctor(id))?
            .clone();

        let doctor_name = catalog
            .doctor(patient.doctor_id())
            .map(|d| d.name.as_str())
            .unwrap_or("Doctor");
        let message = format!(
            "Patient {} registered successfully and assigned to {}!",
            patient.name(),
            doctor_name
        );

        Ok(Registration { patient, message })
    }

    /// Registers a patient after the configured submission delay
    ///
    /// Input is validated before waiting, so an invalid form is rejected
    /// without delay.
    pub async fn submit_registration(
        &mut self,
        request: &RegistrationRequest,
    ) -> Result<Registration> {
        request.validate(|id| self.catalog.has_doctor(id))?;

        let delay = Duration::from_millis(self.config.workflow.submit_delay_ms);
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Submitting registration");
        tokio::time::sleep(delay).await;

        self.register(request)
    }

    /// Pending queue of one doctor, see [`list_pending_for_doctor`]
    pub fn list_pending_for_doctor(
        &self,
        doctor_id: Option<DoctorId>,
        search_term: Option<&str>,
    ) -> Vec<&Patient> {
        list_pending_for_doctor(self.registry.patients(), doctor_id, search_term)
    }

    pub fn get_patient(&self, patient_id: PatientId) -> Result<&Patient> {
        self.registry.get(patient_id)
    }

    pub fn set_selected_medicines(
        &mut self,
        patient_id: PatientId,
        medicines: &[MedicineId],
    ) -> Result<()> {
        self.registry.set_selected_medicines(patient_id, medicines)
    }

    pub fn mark_prescription_printed(&mut self, patient_id: PatientId) -> Result<()> {
        self.registry.mark_prescription_printed(patient_id)
    }

    /// Deletes a patient without recording a completion
    pub fn remove(&mut self, patient_id: PatientId) -> Result<Option<Patient>> {
        self.registry.remove(patient_id)
    }

    /// Removes a completed patient and records the completion
    ///
    /// If the store rejects the removal the patient stays pending and nothing
    /// is recorded. A failing audit write is logged but does not undo the
    /// completion.
    pub(crate) fn complete(&mut self, patient_id: PatientId, action: Action) -> Result<Patient> {
        let patient = self
            .registry
            .remove(patient_id)?
            .ok_or_else(|| TriageError::NotFound(format!("Patient {}", patient_id)))?;

        crate::log_patient_completed!(patient.id(), patient.doctor_id(), action);

        if let Some(audit) = &self.audit {
            if let Err(e) = audit.record(&patient, action) {
                crate::log_error_with_context!(&e, "Failed to append completion audit record");
            }
        }

        Ok(patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::domain::Priority;

    fn clinic() -> Clinic {
        Clinic::with_store(TriageConfig::default(), Arc::new(MemoryStore::new())).unwrap()
    }

    fn request(name: &str) -> RegistrationRequest {
        RegistrationRequest {
            name: name.to_string(),
            age: Some(34),
            details: "blurred vision".to_string(),
            priority: Some(Priority::High),
            doctor_id: Some(DoctorId::new(2)),
        }
    }

    #[test]
    fn test_open_seeds_catalog() {
        let clinic = clinic();
        assert_eq!(clinic.list_doctors().len(), 5);
        assert_eq!(clinic.list_medicines().len(), 8);
        assert!(clinic.registry().is_empty());
        assert!(clinic.load_report().is_clean());
    }

    #[test]
    fn test_register_returns_confirmation_message() {
        let mut clinic = clinic();
        let registration = clinic.register(&request("Jane Doe")).unwrap();
        assert_eq!(
            registration.message,
            "Patient Jane Doe registered successfully and assigned to Dr. Johnson!"
        );
    }

    #[test]
    fn test_remove_does_not_require_audit() {
        let mut clinic = clinic();
        let id = clinic.register(&request("Jane Doe")).unwrap().patient.id();
        assert!(clinic.remove(id).unwrap().is_some());
        assert!(clinic.remove(id).unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_registration_waits_for_delay() {
        let mut clinic = clinic();
        let start = tokio::time::Instant::now();

        clinic.submit_registration(&request("Jane Doe")).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(clinic.registry().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_registration_rejects_without_delay() {
        let mut clinic = clinic();
        let start = tokio::time::Instant::now();

        let err = clinic
            .submit_registration(&RegistrationRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TriageError::Validation(_)));
        assert!(start.elapsed() < Duration::from_millis(1000));
    }
}
