//! Per-doctor queue projection
//!
//! A read-only view over the registry: pending patients of one doctor,
//! optionally narrowed by a name search, most urgent first.

use crate::domain::{Doctor, DoctorId, Patient};
use serde::Serialize;

/// Pending patients of `doctor_id`, sorted by priority rank
///
/// An absent doctor yields an empty list. A search term that is blank after
/// trimming matches everyone; otherwise names must contain the trimmed term,
/// ignoring case. Patients of equal rank keep registration order.
///
/// # Examples
///
/// ```
/// use triage::core::queue::list_pending_for_doctor;
///
/// assert!(list_pending_for_doctor(&[], None, Some("ali")).is_empty());
/// ```
pub fn list_pending_for_doctor<'a>(
    patients: &'a [Patient],
    doctor_id: Option<DoctorId>,
    search_term: Option<&str>,
) -> Vec<&'a Patient> {
    let Some(doctor_id) = doctor_id else {
        return Vec::new();
    };

    let needle = search_term
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let mut queue: Vec<&Patient> = patients
        .iter()
        .filter(|p| p.is_pending() && p.doctor_id() == doctor_id)
        .filter(|p| match &needle {
            Some(needle) => p.name().to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .collect();

    // sort_by is stable
    queue.sort_by(|a, b| b.priority().rank().cmp(&a.priority().rank()));
    queue
}

/// Pending patient count for one doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorLoad {
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub pending: usize,
}

/// Pending counts for every doctor in catalog order
pub fn pending_by_doctor(patients: &[Patient], doctors: &[Doctor]) -> Vec<DoctorLoad> {
    doctors
        .iter()
        .map(|doctor| DoctorLoad {
            doctor_id: doctor.id,
            doctor_name: doctor.name.clone(),
            pending: patients
                .iter()
                .filter(|p| p.is_pending() && p.doctor_id() == doctor.id)
                .count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientId, Priority, RegistrationRequest};
    use chrono::Utc;

    fn patient(id: u64, name: &str, doctor: u64, priority: Priority) -> Patient {
        let valid = RegistrationRequest {
            name: name.to_string(),
            age: Some(30),
            details: "check-up".to_string(),
            priority: Some(priority),
            doctor_id: Some(DoctorId::new(doctor)),
        }
        .validate(|_| true)
        .unwrap();
        Patient::register(PatientId::new(id), valid, Utc::now())
    }

    fn names(queue: &[&Patient]) -> Vec<String> {
        queue.iter().map(|p| p.name().to_string()).collect()
    }

    #[test]
    fn test_absent_doctor_yields_empty_list() {
        let patients = vec![patient(1, "Alice", 1, Priority::High)];
        assert!(list_pending_for_doctor(&patients, None, None).is_empty());
    }

    #[test]
    fn test_only_selected_doctor_is_listed() {
        let patients = vec![
            patient(1, "Alice", 1, Priority::Low),
            patient(2, "Bob", 2, Priority::High),
        ];
        let queue = list_pending_for_doctor(&patients, Some(DoctorId::new(1)), None);
        assert_eq!(names(&queue), vec!["Alice"]);
    }

    #[test]
    fn test_sorted_by_rank_with_stable_ties() {
        let patients = vec![
            patient(1, "Low One", 1, Priority::Low),
            patient(2, "Medium One", 1, Priority::Medium),
            patient(3, "High One", 1, Priority::High),
            patient(4, "Medium Two", 1, Priority::Medium),
            patient(5, "High Two", 1, Priority::High),
        ];
        let queue = list_pending_for_doctor(&patients, Some(DoctorId::new(1)), None);
        assert_eq!(
            names(&queue),
            vec!["High One", "High Two", "Medium One", "Medium Two", "Low One"]
        );
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let patients = vec![
            patient(1, "Alice", 1, Priority::Medium),
            patient(2, "Bob", 1, Priority::Medium),
        ];
        let doctor = Some(DoctorId::new(1));

        assert_eq!(
            names(&list_pending_for_doctor(&patients, doctor, Some("  ALI "))),
            vec!["Alice"]
        );
        assert_eq!(
            list_pending_for_doctor(&patients, doctor, Some("   ")).len(),
            2
        );
        assert!(list_pending_for_doctor(&patients, doctor, Some("zed")).is_empty());
    }

    #[test]
    fn test_pending_by_doctor_counts() {
        let patients = vec![
            patient(1, "Alice", 1, Priority::Medium),
            patient(2, "Bob", 1, Priority::Low),
            patient(3, "Carol", 3, Priority::High),
        ];
        let doctors = vec![
            Doctor::new(DoctorId::new(1), "Dr. Smith", "Ophthalmology").unwrap(),
            Doctor::new(DoctorId::new(2), "Dr. Johnson", "Retina Specialist").unwrap(),
            Doctor::new(DoctorId::new(3), "Dr. Williams", "Glaucoma Specialist").unwrap(),
        ];

        let counts: Vec<usize> = pending_by_doctor(&patients, &doctors)
            .iter()
            .map(|l| l.pending)
            .collect();
        assert_eq!(counts, vec![2, 0, 1]);
    }
}
