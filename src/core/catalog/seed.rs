//! Built-in catalog entries

use crate::domain::{Doctor, DoctorId, Medicine, MedicineId};

const DOCTORS: &[(u64, &str, &str)] = &[
    (1, "Dr. Smith", "Ophthalmology"),
    (2, "Dr. Johnson", "Retina Specialist"),
    (3, "Dr. Williams", "Glaucoma Specialist"),
    (4, "Dr. Brown", "Pediatric Ophthalmology"),
    (5, "Dr. Davis", "Cornea Specialist"),
];

const MEDICINES: &[(u64, &str, &str)] = &[
    (1, "Latanoprost Eye Drops", "Glaucoma"),
    (2, "Timolol Eye Drops", "Glaucoma"),
    (3, "Artificial Tears", "Dry Eyes"),
    (4, "Prednisolone Eye Drops", "Anti-inflammatory"),
    (5, "Ciprofloxacin Eye Drops", "Antibiotic"),
    (6, "Cyclopentolate Eye Drops", "Mydriatic"),
    (7, "Brimonidine Eye Drops", "Glaucoma"),
    (8, "Dorzolamide Eye Drops", "Glaucoma"),
];

pub fn default_doctors() -> Vec<Doctor> {
    DOCTORS
        .iter()
        .map(|(id, name, specialization)| Doctor {
            id: DoctorId::new(*id),
            name: (*name).to_string(),
            specialization: (*specialization).to_string(),
        })
        .collect()
}

pub fn default_medicines() -> Vec<Medicine> {
    MEDICINES
        .iter()
        .map(|(id, name, kind)| Medicine {
            id: MedicineId::new(*id),
            name: (*name).to_string(),
            kind: (*kind).to_string(),
        })
        .collect()
}
