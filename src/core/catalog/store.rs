//! Catalog store
//!
//! Holds the doctor and medicine reference lists. The lists are reseeded from
//! the built-in defaults every run; only [`CatalogStore::add_doctor`] and
//! [`CatalogStore::add_medicine`] change them afterwards.

use super::seed;
use crate::config::CatalogConfig;
use crate::domain::{Doctor, DoctorId, Medicine, MedicineId, Result, TriageError};

/// Doctor and medicine reference data
#[derive(Debug, Clone)]
pub struct CatalogStore {
    doctors: Vec<Doctor>,
    medicines: Vec<Medicine>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl CatalogStore {
    /// Catalog with the built-in doctors and medicines
    pub fn seeded() -> Self {
        Self {
            doctors: seed::default_doctors(),
            medicines: seed::default_medicines(),
        }
    }

    /// Catalog with no entries
    pub fn empty() -> Self {
        Self {
            doctors: Vec::new(),
            medicines: Vec::new(),
        }
    }

    /// Seeded catalog extended with the configured entries
    ///
    /// # Errors
    ///
    /// Returns an error if a configured entry duplicates an existing id.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let mut catalog = Self::seeded();
        for entry in &config.doctors {
            let doctor = Doctor::new(entry.id, entry.name.clone(), entry.specialization.clone())
                .map_err(TriageError::Configuration)?;
            catalog.add_doctor(doctor)?;
        }
        for entry in &config.medicines {
            let medicine = Medicine::new(entry.id, entry.name.clone(), entry.kind.clone())
                .map_err(TriageError::Configuration)?;
            catalog.add_medicine(medicine)?;
        }
        Ok(catalog)
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn doctor(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn medicine(&self, id: MedicineId) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == id)
    }

    pub fn has_doctor(&self, id: DoctorId) -> bool {
        self.doctor(id).is_some()
    }

    /// Names of the given medicines, in the given order
    ///
    /// Ids missing from the catalog are shown as "Unknown Medicine".
    pub fn medicine_names(&self, ids: &[MedicineId]) -> Vec<String> {
        ids.iter()
            .map(|id| {
                self.medicine(*id)
                    .map(|m| m.name.clone())
                    .unwrap_or_else(|| "Unknown Medicine".to_string())
            })
            .collect()
    }

    /// Appends a doctor
    ///
    /// # Errors
    ///
    /// Returns a validation-style error if the id is already taken.
    pub fn add_doctor(&mut self, doctor: Doctor) -> Result<()> {
        if self.has_doctor(doctor.id) {
            return Err(TriageError::Precondition(format!(
                "Doctor id {} already exists",
                doctor.id
            )));
        }
        tracing::info!(doctor_id = %doctor.id, name = %doctor.name, "Doctor added");
        self.doctors.push(doctor);
        Ok(())
    }

    /// Appends a medicine
    ///
    /// # Errors
    ///
    /// Returns an error if the id is already taken.
    pub fn add_medicine(&mut self, medicine: Medicine) -> Result<()> {
        if self.medicine(medicine.id).is_some() {
            return Err(TriageError::Precondition(format!(
                "Medicine id {} already exists",
                medicine.id
            )));
        }
        tracing::info!(medicine_id = %medicine.id, name = %medicine.name, "Medicine added");
        self.medicines.push(medicine);
        Ok(())
    }

    /// Smallest unused doctor id above the current maximum
    pub fn next_doctor_id(&self) -> DoctorId {
        DoctorId::new(self.doctors.iter().map(|d| d.id.get()).max().unwrap_or(0) + 1)
    }

    /// Smallest unused medicine id above the current maximum
    pub fn next_medicine_id(&self) -> MedicineId {
        MedicineId::new(self.medicines.iter().map(|m| m.id.get()).max().unwrap_or(0) + 1)
    }
}
