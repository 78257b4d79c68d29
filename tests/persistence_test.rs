//! Integration tests for persistence across sessions and the audit log

use std::sync::Arc;
use tempfile::TempDir;
use triage::adapters::storage::{FileStore, KeyValueStore, MemoryStore};
use triage::config::{StorageBackend, TriageConfig};
use triage::core::clinic::Clinic;
use triage::core::workflow::{Action, ActionWorkflow};
use triage::domain::{DoctorId, MedicineId, Priority, RegistrationRequest};

fn file_config(dir: &TempDir) -> TriageConfig {
    let mut config = TriageConfig::default();
    config.storage.backend = StorageBackend::File;
    config.storage.path = dir
        .path()
        .join("data/triage-data.json")
        .to_string_lossy()
        .to_string();
    config.audit.path = dir
        .path()
        .join("audit/completions.jsonl")
        .to_string_lossy()
        .to_string();
    config
}

fn request(name: &str, doctor: u64) -> RegistrationRequest {
    RegistrationRequest {
        name: name.to_string(),
        age: Some(62),
        details: "cataract review".to_string(),
        priority: Some(Priority::Low),
        doctor_id: Some(DoctorId::new(doctor)),
    }
}

#[test]
fn test_patients_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let id = {
        let mut clinic = Clinic::open(file_config(&dir)).unwrap();
        let id = clinic.register(&request("Alice", 3)).unwrap().patient.id();
        clinic
            .set_selected_medicines(id, &[MedicineId::new(7), MedicineId::new(8)])
            .unwrap();
        clinic.mark_prescription_printed(id).unwrap();
        id
    };

    let clinic = Clinic::open(file_config(&dir)).unwrap();
    let patient = clinic.get_patient(id).unwrap();
    assert_eq!(patient.name(), "Alice");
    assert_eq!(
        patient.selected_medicines(),
        &[MedicineId::new(7), MedicineId::new(8)]
    );
    assert!(patient.prescription_printed());
    assert_eq!(clinic.load_report().restored, 1);
}

#[test]
fn test_collection_is_stored_under_namespace_key() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);
    let path = config.storage.path.clone();
    let key = config.storage.namespace_key.clone();

    let mut clinic = Clinic::open(config).unwrap();
    clinic.register(&request("Alice", 3)).unwrap();

    let store = FileStore::open(&path).unwrap();
    let raw = store.get(&key).unwrap().unwrap();
    let records: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(records[0]["name"], "Alice");
    assert_eq!(records[0]["status"], "pending");
    assert_eq!(records[0]["doctorId"], 3);
    assert_eq!(records[0]["priority"], "Low");
}

#[test]
fn test_malformed_and_orphaned_records_are_dropped_on_load() {
    let raw = serde_json::json!([
        {
            "id": 1,
            "name": "Alice",
            "age": 30,
            "details": "red eye",
            "priority": "Urgent",
            "doctorId": 2,
            "status": "pending",
            "selectedMedicines": [],
            "prescriptionPrinted": false,
            "registrationTime": "2025-03-01T09:30:00Z"
        },
        {
            "id": 2,
            "name": "Ghost",
            "age": 30,
            "details": "red eye",
            "doctorId": 77,
            "status": "pending",
            "registrationTime": "2025-03-01T09:30:00Z"
        },
        { "id": 3, "name": 12 },
        null
    ])
    .to_string();

    let config = TriageConfig::default();
    let store = Arc::new(MemoryStore::with_entry(
        config.storage.namespace_key.clone(),
        raw,
    ));
    let clinic = Clinic::with_store(config, store).unwrap();

    assert_eq!(clinic.registry().len(), 1);
    assert_eq!(clinic.load_report().dropped, 3);

    // Unrecognized priority ranks as Medium
    let queue = clinic.list_pending_for_doctor(Some(DoctorId::new(2)), None);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].priority(), Priority::Medium);
}

#[test]
fn test_completion_is_audited_when_enabled() {
    let dir = TempDir::new().unwrap();
    let mut config = file_config(&dir);
    config.audit.enabled = true;

    let mut clinic = Clinic::open(config).unwrap();
    let id = clinic.register(&request("Alice", 3)).unwrap().patient.id();

    let mut workflow = ActionWorkflow::new();
    workflow.select(&clinic, id).unwrap();
    workflow
        .choose_action(&mut clinic, Action::ReferToHospital)
        .unwrap();
    workflow.mark_done(&mut clinic).unwrap();

    let records = clinic.audit_log().unwrap().read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].patient_id, id);
    assert_eq!(records[0].action, Action::ReferToHospital);
    assert!(records[0].patient_name.is_none());
    assert!(records[0].patient_name_hash.is_some());

    // Plain removal is not a completion
    let other = clinic.register(&request("Bob", 3)).unwrap().patient.id();
    clinic.remove(other).unwrap();
    assert_eq!(clinic.audit_log().unwrap().read_all().unwrap().len(), 1);
}

#[test]
fn test_clinic_opens_over_corrupt_store_file() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(&config.storage.path, "{not json").unwrap();

    let mut clinic = Clinic::open(config.clone()).unwrap();
    let report = clinic.load_report().clone();
    assert!(clinic.registry().is_empty());
    assert!(report.unreadable);
    assert_eq!(
        report.quarantined,
        Some(dir.path().join("data/triage-data.json.corrupt"))
    );

    let id = clinic.register(&request("Alice", 3)).unwrap().patient.id();
    drop(clinic);

    let reopened = Clinic::open(config).unwrap();
    assert!(reopened.load_report().is_clean());
    assert_eq!(reopened.get_patient(id).unwrap().name(), "Alice");
}
