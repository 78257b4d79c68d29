//! Catalog reference types
//!
//! Doctors and medicines are reference data: seeded at start-up, optionally
//! extended by an administrator, never deleted.

use super::ids::{DoctorId, MedicineId};
use serde::{Deserialize, Serialize};

/// A doctor patients can be assigned to
///
/// # Examples
///
/// ```
/// use triage::domain::catalog::Doctor;
/// use triage::domain::ids::DoctorId;
///
/// let doctor = Doctor::new(DoctorId::new(6), "Dr. Moore", "Neuro-Ophthalmology").unwrap();
/// assert_eq!(doctor.name, "Dr. Moore");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialization: String,
}

impl Doctor {
    /// Creates a doctor, rejecting a blank name
    pub fn new(
        id: DoctorId,
        name: impl Into<String>,
        specialization: impl Into<String>,
    ) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Doctor name cannot be empty".to_string());
        }
        Ok(Self {
            id,
            name,
            specialization: specialization.into(),
        })
    }
}

/// A medicine that can be prescribed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    /// Therapeutic class, e.g. "Glaucoma"
    #[serde(rename = "type")]
    pub kind: String,
}

impl Medicine {
    /// Creates a medicine, rejecting a blank name
    pub fn new(
        id: MedicineId,
        name: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Medicine name cannot be empty".to_string());
        }
        Ok(Self {
            id,
            name,
            kind: kind.into(),
        })
    }
}
