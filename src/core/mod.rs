//! Core business logic for the triage desk.
//!
//! # Modules
//!
//! - [`catalog`] - Doctor and medicine reference data
//! - [`registry`] - Pending-patient collection with write-through persistence
//! - [`queue`] - Per-doctor queue view and search debouncing
//! - [`workflow`] - Action state machine and notifications
//! - [`audit`] - Completion audit log
//! - [`clinic`] - Application state tying the above together
//!
//! # Workflow
//!
//! 1. **Register**: front desk validates and adds a pending patient
//! 2. **Queue**: the doctor sees their pending patients, most urgent first
//! 3. **Act**: the doctor picks a video call, a referral or a prescription
//! 4. **Complete**: once the action allows it the patient leaves the queue
//!
//! # Example
//!
//! ```rust,no_run
//! use triage::config::TriageConfig;
//! use triage::core::clinic::Clinic;
//! use triage::core::workflow::{Action, ActionWorkflow};
//! use triage::domain::{DoctorId, Priority, RegistrationRequest};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut clinic = Clinic::open(TriageConfig::default())?;
//!
//! let registration = clinic.register(&RegistrationRequest {
//!     name: "Jane Doe".to_string(),
//!     age: Some(34),
//!     details: "Blurred vision".to_string(),
//!     priority: Some(Priority::High),
//!     doctor_id: Some(DoctorId::new(1)),
//! })?;
//!
//! let mut workflow = ActionWorkflow::new();
//! workflow.select(&clinic, registration.patient.id())?;
//! workflow.choose_action(&mut clinic, Action::VideoCall)?;
//! workflow.mark_done(&mut clinic)?;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod catalog;
pub mod clinic;
pub mod queue;
pub mod registry;
pub mod workflow;
