//! Patient domain model
//!
//! A [`Patient`] can only be built through registration validation or by
//! restoring a persisted [`PatientRecord`]. Both paths enforce the same shape,
//! so code holding a `Patient` never has to re-check it.

use super::errors::{Field, ValidationErrors};
use super::ids::{DoctorId, MedicineId, PatientId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Youngest accepted age
pub const MIN_AGE: i64 = 1;

/// Oldest accepted age
pub const MAX_AGE: i64 = 120;

/// Triage priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, higher is seen first
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Reads a persisted priority label
    ///
    /// Missing or unrecognized labels fall back to [`Priority::Medium`].
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("High") => Priority::High,
            Some("Low") => Priority::Low,
            _ => Priority::Medium,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!(
                "Invalid priority '{s}'. Must be one of: High, Medium, Low"
            )),
        }
    }
}

/// Lifecycle status
///
/// Only pending patients are ever held in the registry; completing a case
/// removes the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    #[default]
    Pending,
    Done,
}

/// Registration form input
///
/// Fields are optional where the form allows them to be left empty, so that
/// validation can report "required" separately from "out of range".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub age: Option<i64>,
    pub details: String,
    pub priority: Option<Priority>,
    pub doctor_id: Option<DoctorId>,
}

impl RegistrationRequest {
    /// Validates every field, collecting all failures
    ///
    /// `doctor_exists` resolves a doctor id against the catalog.
    pub fn validate(
        &self,
        doctor_exists: impl Fn(DoctorId) -> bool,
    ) -> Result<ValidRegistration, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.push(Field::Name, "Name is required");
        }

        match self.age {
            None => errors.push(Field::Age, "Age is required"),
            Some(age) if !(MIN_AGE..=MAX_AGE).contains(&age) => {
                errors.push(Field::Age, "Please enter a valid age (1-120)")
            }
            Some(_) => {}
        }

        if self.details.trim().is_empty() {
            errors.push(Field::Details, "Details are required");
        }

        match self.doctor_id {
            None => errors.push(Field::DoctorId, "Please select a doctor"),
            Some(id) if !doctor_exists(id) => {
                errors.push(Field::DoctorId, format!("Unknown doctor: {id}"))
            }
            Some(_) => {}
        }

        errors.into_result()?;

        Ok(ValidRegistration {
            name: self.name.trim().to_string(),
            age: self.age.unwrap_or_default() as u8,
            details: self.details.trim().to_string(),
            priority: self.priority.unwrap_or_default(),
            doctor_id: self.doctor_id.unwrap_or(DoctorId::new(0)),
        })
    }
}

/// Registration input that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    name: String,
    age: u8,
    details: String,
    priority: Priority,
    doctor_id: DoctorId,
}

/// A pending patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    id: PatientId,
    name: String,
    age: u8,
    details: String,
    priority: Priority,
    doctor_id: DoctorId,
    status: PatientStatus,
    selected_medicines: Vec<MedicineId>,
    prescription_printed: bool,
    registration_time: DateTime<Utc>,
}

impl Patient {
    /// Creates a freshly registered patient
    pub fn register(id: PatientId, input: ValidRegistration, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            age: input.age,
            details: input.details,
            priority: input.priority,
            doctor_id: input.doctor_id,
            status: PatientStatus::Pending,
            selected_medicines: Vec::new(),
            prescription_printed: false,
            registration_time: now,
        }
    }

    /// Rebuilds a patient from a persisted record
    ///
    /// Returns the reason the record was rejected when it does not have the
    /// shape of a pending patient.
    pub fn restore(
        record: PatientRecord,
        doctor_exists: impl Fn(DoctorId) -> bool,
    ) -> Result<Self, String> {
        let id = record.id.ok_or("missing id")?;

        let name = record
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or("missing name")?;

        let age = record
            .age
            .filter(|a| (MIN_AGE..=MAX_AGE).contains(a))
            .ok_or("missing or invalid age")? as u8;

        let details = record
            .details
            .filter(|d| !d.trim().is_empty())
            .ok_or("missing details")?;

        let doctor_id = record.doctor_id.ok_or("missing doctorId")?;
        if !doctor_exists(doctor_id) {
            return Err(format!("unknown doctor {doctor_id}"));
        }

        match record.status.as_deref() {
            Some("pending") => {}
            Some(other) => return Err(format!("status '{other}' is not pending")),
            None => return Err("missing status".to_string()),
        }

        let registration_time = record
            .registration_time
            .ok_or("missing registrationTime")?;

        let priority = Priority::from_label(record.priority.as_ref().and_then(|p| p.as_str()));

        let mut selected_medicines = Vec::new();
        for medicine in record.selected_medicines.unwrap_or_default() {
            if !selected_medicines.contains(&medicine) {
                selected_medicines.push(medicine);
            }
        }

        // A printed flag without medicines cannot have come from the print action.
        let prescription_printed =
            record.prescription_printed.unwrap_or(false) && !selected_medicines.is_empty();

        Ok(Self {
            id,
            name,
            age,
            details,
            priority,
            doctor_id,
            status: PatientStatus::Pending,
            selected_medicines,
            prescription_printed,
            registration_time,
        })
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn doctor_id(&self) -> DoctorId {
        self.doctor_id
    }

    pub fn status(&self) -> PatientStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == PatientStatus::Pending
    }

    pub fn selected_medicines(&self) -> &[MedicineId] {
        &self.selected_medicines
    }

    pub fn prescription_printed(&self) -> bool {
        self.prescription_printed
    }

    pub fn registration_time(&self) -> DateTime<Utc> {
        self.registration_time
    }

    /// Replaces the medicine selection, collapsing duplicates
    pub(crate) fn set_selected_medicines(&mut self, medicines: &[MedicineId]) {
        self.selected_medicines.clear();
        for medicine in medicines {
            if !self.selected_medicines.contains(medicine) {
                self.selected_medicines.push(*medicine);
            }
        }
    }

    pub(crate) fn set_prescription_printed(&mut self) {
        self.prescription_printed = true;
    }

    /// Converts back into the persisted shape
    pub fn to_record(&self) -> PatientRecord {
        PatientRecord {
            id: Some(self.id),
            name: Some(self.name.clone()),
            age: Some(i64::from(self.age)),
            details: Some(self.details.clone()),
            priority: Some(serde_json::Value::String(self.priority.to_string())),
            doctor_id: Some(self.doctor_id),
            status: Some("pending".to_string()),
            selected_medicines: Some(self.selected_medicines.clone()),
            prescription_printed: Some(self.prescription_printed),
            registration_time: Some(self.registration_time),
        }
    }
}

/// Persisted patient shape
///
/// Every field is optional so that one damaged field rejects only its own
/// record during restore instead of the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(default)]
    pub id: Option<PatientId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub details: Option<String>,
    /// Kept untyped: a non-string priority degrades to Medium instead of failing
    #[serde(default)]
    pub priority: Option<serde_json::Value>,
    #[serde(default)]
    pub doctor_id: Option<DoctorId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub selected_medicines: Option<Vec<MedicineId>>,
    #[serde(default)]
    pub prescription_printed: Option<bool>,
    #[serde(default)]
    pub registration_time: Option<DateTime<Utc>>,
}
