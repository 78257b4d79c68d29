// Triage - Clinic front desk and doctor queue
// Copyright (c) 2025 Triage Contributors
// Licensed under the MIT License

//! # Triage - clinic front desk and doctor queue
//!
//! Front-desk staff register patients and assign them to a doctor. Doctors
//! work a prioritized queue of pending patients, record an action (video
//! call, hospital referral or medicine prescription) and close out cases.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (catalog, registry, queue view, action workflow)
//! - [`adapters`] - Persistence backends
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use triage::config::load_config_or_default;
//! use triage::core::clinic::Clinic;
//! use triage::domain::{DoctorId, RegistrationRequest};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("triage.toml")?;
//! let mut clinic = Clinic::open(config)?;
//!
//! let registration = clinic.register(&RegistrationRequest {
//!     name: "Jane Doe".to_string(),
//!     age: Some(34),
//!     details: "Blurred vision".to_string(),
//!     priority: None,
//!     doctor_id: Some(DoctorId::new(1)),
//! })?;
//! println!("{}", registration.message);
//!
//! for patient in clinic.list_pending_for_doctor(Some(DoctorId::new(1)), None) {
//!     println!("{} ({})", patient.name(), patient.priority());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::TriageError`]. Registration
//! failures carry every invalid field at once:
//!
//! ```rust
//! use triage::domain::{Field, RegistrationRequest, TriageError};
//!
//! let errors = RegistrationRequest::default().validate(|_| true).unwrap_err();
//! assert!(errors.contains(Field::Name));
//! assert!(errors.contains(Field::DoctorId));
//!
//! let error: TriageError = errors.into();
//! assert!(error.is_rejection());
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
