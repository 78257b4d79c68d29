//! Patient registry
//!
//! Owns the pending-patient collection and every state transition on it.
//! Each mutation is applied in memory and then written through to the
//! key-value store under the namespace key, so the next read sees it and the
//! next start restores it. A mutation whose write fails is rolled back, so
//! memory never runs ahead of the store.

use super::report::LoadReport;
use crate::adapters::storage::KeyValueStore;
use crate::domain::{
    DoctorId, MedicineId, Patient, PatientId, PatientIdGenerator, PatientRecord,
    RegistrationRequest, Result, TriageError,
};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

/// Pending-patient collection with write-through persistence
pub struct PatientRegistry {
    store: Arc<dyn KeyValueStore>,
    namespace_key: String,
    patients: Vec<Patient>,
    ids: PatientIdGenerator,
}

impl std::fmt::Debug for PatientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientRegistry")
            .field("backend", &self.store.backend_name())
            .field("namespace_key", &self.namespace_key)
            .field("patients", &self.patients.len())
            .finish()
    }
}

impl PatientRegistry {
    /// Restores the registry from `store`
    ///
    /// Records that fail validation are dropped with a warning and counted in
    /// the returned [`LoadReport`]. A stored value that is not a JSON array is
    /// treated as an empty collection, as is a backing file the store had to
    /// move aside. Only a failing store read is an error.
    ///
    /// # Arguments
    ///
    /// * `store` - Persistence backend
    /// * `namespace_key` - Key holding the serialized collection
    /// * `doctor_exists` - Catalog lookup used to reject orphaned records
    pub fn load(
        store: Arc<dyn KeyValueStore>,
        namespace_key: impl Into<String>,
        doctor_exists: impl Fn(DoctorId) -> bool,
    ) -> Result<(Self, LoadReport)> {
        let namespace_key = namespace_key.into();
        let mut report = LoadReport::default();
        let mut patients = Vec::new();

        if let Some(aside) = store.quarantined_file() {
            report.unreadable = true;
            report.quarantined = Some(aside);
        }

        if let Some(raw) = store.get(&namespace_key)? {
            match parse_records(&raw) {
                Some(records) => {
                    let mut seen = HashSet::new();
                    for value in records {
                        match restore_one(value, &doctor_exists, &mut seen) {
                            Ok(patient) => patients.push(patient),
                            Err(reason) => {
                                tracing::warn!(reason = %reason, "Dropping persisted patient record");
                                report.dropped += 1;
                            }
                        }
                    }
                }
                None => {
                    tracing::warn!(
                        key = %namespace_key,
                        "Persisted patient collection is not a JSON array, starting empty"
                    );
                    report.unreadable = true;
                }
            }
        }

        report.restored = patients.len();

        let floor = patients.iter().map(|p| p.id().get()).max().unwrap_or(0);
        let registry = Self {
            store,
            namespace_key,
            patients,
            ids: PatientIdGenerator::starting_after(floor),
        };

        tracing::info!(
            backend = registry.store.backend_name(),
            restored = report.restored,
            dropped = report.dropped,
            "Patient registry loaded"
        );

        Ok((registry, report))
    }

    /// Validates and adds a new pending patient
    ///
    /// On a validation failure the registry is left unchanged and every
    /// invalid field is reported.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Validation`] for invalid input, or
    /// [`TriageError::Storage`] if the write-through fails. Either way the
    /// registry is left unchanged.
    pub fn register(
        &mut self,
        request: &RegistrationRequest,
        doctor_exists: impl Fn(DoctorId) -> bool,
    ) -> Result<&Patient> {
        let valid = request.validate(doctor_exists)?;
        let patient = Patient::register(self.ids.next_id()?, valid, Utc::now());

        let index = self.patients.len();
        self.patients.push(patient);
        if let Err(e) = self.persist() {
            self.patients.pop();
            return Err(e);
        }

        let patient = &self.patients[index];
        crate::log_patient_registered!(patient.id(), patient.doctor_id(), patient.priority());
        Ok(patient)
    }

    /// Replaces the medicine selection of a patient
    ///
    /// Duplicates are collapsed keeping first occurrence order. A missing
    /// patient is a no-op.
    pub fn set_selected_medicines(
        &mut self,
        patient_id: PatientId,
        medicines: &[MedicineId],
    ) -> Result<()> {
        let Some(index) = self.position(patient_id) else {
            tracing::debug!(patient_id = %patient_id, "Medicine selection for unknown patient ignored");
            return Ok(());
        };

        let previous = self.patients[index].clone();
        self.patients[index].set_selected_medicines(medicines);
        self.persist_or_restore(index, previous)
    }

    /// Marks a patient's prescription as printed
    ///
    /// Idempotent once printed. A missing patient is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Precondition`] when no medicine is selected.
    pub fn mark_prescription_printed(&mut self, patient_id: PatientId) -> Result<()> {
        let Some(index) = self.position(patient_id) else {
            tracing::debug!(patient_id = %patient_id, "Print for unknown patient ignored");
            return Ok(());
        };

        let patient = &self.patients[index];
        if patient.selected_medicines().is_empty() {
            return Err(TriageError::Precondition(format!(
                "Patient {} has no medicines selected",
                patient_id
            )));
        }
        if patient.prescription_printed() {
            return Ok(());
        }

        let previous = patient.clone();
        self.patients[index].set_prescription_printed();
        self.persist_or_restore(index, previous)
    }

    /// Deletes a patient, returning it if it was present
    ///
    /// Removing an id that is not registered is not an error.
    pub fn remove(&mut self, patient_id: PatientId) -> Result<Option<Patient>> {
        let Some(index) = self.position(patient_id) else {
            return Ok(None);
        };

        let patient = self.patients.remove(index);
        if let Err(e) = self.persist() {
            self.patients.insert(index, patient);
            return Err(e);
        }
        Ok(Some(patient))
    }

    /// Returns a patient by id
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::NotFound`] if no pending patient has that id.
    pub fn get(&self, patient_id: PatientId) -> Result<&Patient> {
        self.patients
            .iter()
            .find(|p| p.id() == patient_id)
            .ok_or_else(|| TriageError::NotFound(format!("Patient {}", patient_id)))
    }

    /// All pending patients in registration order
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn namespace_key(&self) -> &str {
        &self.namespace_key
    }

    fn position(&self, patient_id: PatientId) -> Option<usize> {
        self.patients.iter().position(|p| p.id() == patient_id)
    }

    /// Persists, putting `previous` back at `index` if the write fails
    fn persist_or_restore(&mut self, index: usize, previous: Patient) -> Result<()> {
        if let Err(e) = self.persist() {
            self.patients[index] = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Writes the full collection under the namespace key
    fn persist(&self) -> Result<()> {
        let records: Vec<PatientRecord> = self.patients.iter().map(Patient::to_record).collect();
        let json = serde_json::to_string(&records)?;

        self.store.set(&self.namespace_key, &json).map_err(|e| {
            crate::log_error_with_context!(&e, "Failed to persist patient collection");
            e
        })?;

        tracing::debug!(
            key = %self.namespace_key,
            patients = self.patients.len(),
            "Patient collection persisted"
        );
        Ok(())
    }
}

/// Accepts either a bare array or an object wrapping it under `patients`
fn parse_records(raw: &str) -> Option<Vec<serde_json::Value>> {
    match serde_json::from_str::<serde_json::Value>(raw).ok()? {
        serde_json::Value::Array(values) => Some(values),
        serde_json::Value::Object(mut map) => match map.remove("patients")? {
            serde_json::Value::Array(values) => Some(values),
            _ => None,
        },
        _ => None,
    }
}

fn restore_one(
    value: serde_json::Value,
    doctor_exists: &impl Fn(DoctorId) -> bool,
    seen: &mut HashSet<PatientId>,
) -> std::result::Result<Patient, String> {
    let record: PatientRecord =
        serde_json::from_value(value).map_err(|e| format!("malformed record: {e}"))?;
    let patient = Patient::restore(record, doctor_exists)?;

    if !seen.insert(patient.id()) {
        return Err(format!("duplicate id {}", patient.id()));
    }
    Ok(patient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::domain::{PatientStatus, Priority};

    const KEY: &str = "triage:patients";

    /// Serves a preloaded value but rejects every write
    struct ReadOnlyStore {
        value: Option<String>,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(self.value.clone())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(TriageError::Storage("disk full".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(TriageError::Storage("disk full".to_string()))
        }

        fn backend_name(&self) -> &'static str {
            "read-only"
        }
    }

    fn record(id: u64, name: &str) -> PatientRecord {
        PatientRecord {
            id: Some(PatientId::new(id)),
            name: Some(name.to_string()),
            age: Some(50),
            details: Some("floaters".to_string()),
            priority: None,
            doctor_id: Some(DoctorId::new(1)),
            status: Some("pending".to_string()),
            selected_medicines: None,
            prescription_printed: None,
            registration_time: Some(Utc::now()),
        }
    }

    fn read_only_registry(records: Vec<PatientRecord>) -> PatientRegistry {
        let store: Arc<dyn KeyValueStore> = Arc::new(ReadOnlyStore {
            value: Some(serde_json::to_string(&records).unwrap()),
        });
        PatientRegistry::load(store, KEY, |_| true).unwrap().0
    }

    fn empty_registry() -> PatientRegistry {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        PatientRegistry::load(store, KEY, |_| true).unwrap().0
    }

    fn request(name: &str, priority: Priority) -> RegistrationRequest {
        RegistrationRequest {
            name: name.to_string(),
            age: Some(40),
            details: "routine check".to_string(),
            priority: Some(priority),
            doctor_id: Some(DoctorId::new(1)),
        }
    }

    #[test]
    fn test_register_creates_pending_patient() {
        let mut registry = empty_registry();

        let patient = registry
            .register(&request("Jane Doe", Priority::High), |_| true)
            .unwrap();

        assert_eq!(patient.status(), PatientStatus::Pending);
        assert!(patient.selected_medicines().is_empty());
        assert!(!patient.prescription_printed());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_ids_are_unique() {
        let mut registry = empty_registry();
        let mut ids = HashSet::new();
        for i in 0..50 {
            let id = registry
                .register(&request(&format!("Patient {i}"), Priority::Low), |_| true)
                .unwrap()
                .id();
            assert!(ids.insert(id));
        }
    }

    #[test]
    fn test_invalid_registration_leaves_registry_unchanged() {
        let mut registry = empty_registry();
        let mut req = request("", Priority::Medium);
        req.age = None;

        let err = registry.register(&req, |_| true).unwrap_err();
        assert!(matches!(err, TriageError::Validation(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_mark_printed_requires_medicines() {
        let mut registry = empty_registry();
        let id = registry
            .register(&request("Jane Doe", Priority::High), |_| true)
            .unwrap()
            .id();

        let err = registry.mark_prescription_printed(id).unwrap_err();
        assert!(matches!(err, TriageError::Precondition(_)));
        assert!(!registry.get(id).unwrap().prescription_printed());

        registry
            .set_selected_medicines(id, &[MedicineId::new(3)])
            .unwrap();
        registry.mark_prescription_printed(id).unwrap();
        registry.mark_prescription_printed(id).unwrap();
        assert!(registry.get(id).unwrap().prescription_printed());
    }

    #[test]
    fn test_mutations_on_missing_patient_are_noops() {
        let mut registry = empty_registry();
        let ghost = PatientId::new(42);

        registry
            .set_selected_medicines(ghost, &[MedicineId::new(1)])
            .unwrap();
        registry.mark_prescription_printed(ghost).unwrap();
        assert!(registry.remove(ghost).unwrap().is_none());
        assert!(matches!(
            registry.get(ghost),
            Err(TriageError::NotFound(_))
        ));
    }

    #[test]
    fn test_mutations_are_written_through() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (mut registry, _) = PatientRegistry::load(store.clone(), KEY, |_| true).unwrap();

        let id = registry
            .register(&request("Jane Doe", Priority::High), |_| true)
            .unwrap()
            .id();
        registry
            .set_selected_medicines(id, &[MedicineId::new(3), MedicineId::new(1)])
            .unwrap();

        let (reloaded, report) = PatientRegistry::load(store, KEY, |_| true).unwrap();
        assert_eq!(report.restored, 1);
        assert_eq!(
            reloaded.get(id).unwrap().selected_medicines(),
            &[MedicineId::new(3), MedicineId::new(1)]
        );
    }

    #[test]
    fn test_load_drops_bad_records() {
        let good = Patient::restore(
            PatientRecord {
                id: Some(PatientId::new(7)),
                name: Some("Alice".to_string()),
                age: Some(30),
                details: Some("itchy eyes".to_string()),
                priority: Some(serde_json::json!("Low")),
                doctor_id: Some(DoctorId::new(1)),
                status: Some("pending".to_string()),
                selected_medicines: None,
                prescription_printed: None,
                registration_time: Some(Utc::now()),
            },
            |_| true,
        )
        .unwrap();

        let mut orphan = good.to_record();
        orphan.id = Some(PatientId::new(8));
        orphan.doctor_id = Some(DoctorId::new(99));

        let duplicate = good.to_record();

        let raw = serde_json::to_string(&serde_json::json!([
            good.to_record(),
            orphan,
            duplicate,
            "not a record",
            { "id": 9 }
        ]))
        .unwrap();

        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entry(KEY, raw));
        let (registry, report) =
            PatientRegistry::load(store, KEY, |id| id == DoctorId::new(1)).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(report.restored, 1);
        assert_eq!(report.dropped, 4);
        assert!(!report.unreadable);
    }

    #[test]
    fn test_load_unreadable_value_starts_empty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entry(KEY, "{broken"));
        let (registry, report) = PatientRegistry::load(store, KEY, |_| true).unwrap();

        assert!(registry.is_empty());
        assert!(report.unreadable);
    }

    #[test]
    fn test_new_ids_stay_above_restored_ids() {
        let far_future = u64::try_from(Utc::now().timestamp_millis()).unwrap() + 10_000_000;
        let raw = serde_json::to_string(&vec![record(far_future, "Bob")]).unwrap();

        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entry(KEY, raw));
        let (mut registry, _) = PatientRegistry::load(store, KEY, |_| true).unwrap();

        let id = registry
            .register(&request("Carol", Priority::Medium), |_| true)
            .unwrap()
            .id();
        assert!(id.get() > far_future);
    }

    #[test]
    fn test_register_after_max_restored_id_is_refused() {
        let raw = serde_json::to_string(&vec![record(u64::MAX, "Bob")]).unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entry(KEY, raw));
        let (mut registry, _) = PatientRegistry::load(store, KEY, |_| true).unwrap();

        let err = registry
            .register(&request("Carol", Priority::Medium), |_| true)
            .unwrap_err();

        assert!(matches!(err, TriageError::Other(_)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(PatientId::new(u64::MAX)).unwrap().name(), "Bob");
    }

    #[test]
    fn test_failed_write_rolls_back_register() {
        let mut registry = read_only_registry(Vec::new());

        let err = registry
            .register(&request("Jane Doe", Priority::High), |_| true)
            .unwrap_err();

        assert!(matches!(err, TriageError::Storage(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failed_write_rolls_back_updates() {
        let mut selected = record(7, "Alice");
        selected.selected_medicines = Some(vec![MedicineId::new(2)]);
        let mut registry = read_only_registry(vec![selected]);
        let id = PatientId::new(7);

        assert!(registry
            .set_selected_medicines(id, &[MedicineId::new(5)])
            .is_err());
        assert_eq!(registry.get(id).unwrap().selected_medicines(), &[MedicineId::new(2)]);

        assert!(registry.mark_prescription_printed(id).is_err());
        assert!(!registry.get(id).unwrap().prescription_printed());
    }

    #[test]
    fn test_failed_write_rolls_back_remove() {
        let mut registry = read_only_registry(vec![record(7, "Alice"), record(8, "Bob")]);

        assert!(registry.remove(PatientId::new(7)).is_err());

        let names: Vec<_> = registry.patients().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Alice", "Bob"]);
    }
}
