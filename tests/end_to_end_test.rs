//! End-to-end scenario from registration to completion

use std::sync::Arc;
use triage::adapters::storage::MemoryStore;
use triage::config::TriageConfig;
use triage::core::clinic::Clinic;
use triage::core::workflow::{Action, ActionWorkflow};
use triage::domain::{DoctorId, MedicineId, Priority, RegistrationRequest};

fn request(name: &str, priority: Priority) -> RegistrationRequest {
    RegistrationRequest {
        name: name.to_string(),
        age: Some(34),
        details: "blurred vision".to_string(),
        priority: Some(priority),
        doctor_id: Some(DoctorId::new(1)),
    }
}

#[test]
fn test_jane_doe_scenario_through_registry() {
    let mut clinic =
        Clinic::with_store(TriageConfig::default(), Arc::new(MemoryStore::new())).unwrap();
    clinic.register(&request("Mark Medium", Priority::Medium)).unwrap();
    clinic.register(&request("Lucy Low", Priority::Low)).unwrap();
    let jane = clinic
        .register(&request("Jane Doe", Priority::High))
        .unwrap()
        .patient
        .id();

    let queue = clinic.list_pending_for_doctor(Some(DoctorId::new(1)), None);
    assert_eq!(queue[0].id(), jane);

    clinic
        .set_selected_medicines(jane, &[MedicineId::new(3)])
        .unwrap();
    assert_eq!(
        clinic.get_patient(jane).unwrap().selected_medicines(),
        &[MedicineId::new(3)]
    );

    clinic.mark_prescription_printed(jane).unwrap();
    assert!(clinic.get_patient(jane).unwrap().prescription_printed());

    clinic.remove(jane).unwrap();
    for doctor in clinic.list_doctors().iter().map(|d| d.id).collect::<Vec<_>>() {
        assert!(clinic
            .list_pending_for_doctor(Some(doctor), None)
            .iter()
            .all(|p| p.id() != jane));
    }
    assert_eq!(clinic.registry().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_jane_doe_scenario_through_workflow() {
    let mut clinic =
        Clinic::with_store(TriageConfig::default(), Arc::new(MemoryStore::new())).unwrap();
    clinic.register(&request("Lucy Low", Priority::Low)).unwrap();

    let registration = clinic
        .submit_registration(&request("Jane Doe", Priority::High))
        .await
        .unwrap();
    assert_eq!(
        registration.message,
        "Patient Jane Doe registered successfully and assigned to Dr. Smith!"
    );
    let jane = registration.patient.id();

    let top = clinic.list_pending_for_doctor(Some(DoctorId::new(1)), Some("jane"))[0].id();
    assert_eq!(top, jane);

    let mut workflow = ActionWorkflow::new();
    workflow.select(&clinic, jane).unwrap();
    workflow
        .choose_action(&mut clinic, Action::MedicinePrescription)
        .unwrap();
    workflow
        .toggle_medicine(&mut clinic, MedicineId::new(3))
        .unwrap();
    assert!(workflow.print_prescription(&mut clinic).unwrap());
    assert!(workflow.can_mark_done(&clinic));

    let done = workflow.mark_done(&mut clinic).unwrap();
    assert_eq!(done.name(), "Jane Doe");
    assert!(clinic.get_patient(jane).is_err());
    assert_eq!(
        clinic
            .list_pending_for_doctor(Some(DoctorId::new(1)), None)
            .len(),
        1
    );
}
