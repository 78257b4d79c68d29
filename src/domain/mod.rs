//! Domain models and types for the triage desk.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`DoctorId`], [`MedicineId`], [`PatientId`])
//! - **Reference data** ([`Doctor`], [`Medicine`])
//! - **The patient model** ([`Patient`], [`Priority`], [`RegistrationRequest`])
//! - **Error types** ([`TriageError`], [`ValidationErrors`])
//! - **Result type alias** ([`Result`])
//!
//! # Validated construction
//!
//! A [`Patient`] is only ever produced by [`RegistrationRequest::validate`]
//! followed by [`Patient::register`], or by [`Patient::restore`] from a
//! persisted record. Both enforce the same shape:
//!
//! ```rust
//! use triage::domain::{DoctorId, Patient, PatientId, Priority, RegistrationRequest};
//! use chrono::Utc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = RegistrationRequest {
//!     name: "Jane Doe".to_string(),
//!     age: Some(34),
//!     details: "blurred vision".to_string(),
//!     priority: Some(Priority::High),
//!     doctor_id: Some(DoctorId::new(1)),
//! };
//!
//! let valid = request.validate(|id| id == DoctorId::new(1))?;
//! let patient = Patient::register(PatientId::new(1), valid, Utc::now());
//! assert!(patient.is_pending());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod errors;
pub mod ids;
pub mod patient;
pub mod result;

// Re-export commonly used types for convenience
pub use catalog::{Doctor, Medicine};
pub use errors::{Field, FieldError, TriageError, ValidationErrors};
pub use ids::{DoctorId, MedicineId, PatientId, PatientIdGenerator};
pub use patient::{
    Patient, PatientRecord, PatientStatus, Priority, RegistrationRequest, ValidRegistration,
};
pub use result::Result;
