//! Logging and observability
//!
//! Structured logging through `tracing`, with a console layer and an
//! optional rotating JSON file layer.
//!
//! # Example
//!
//! ```no_run
//! use triage::logging::init_logging;
//! use triage::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Front desk open");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a successful registration
///
/// # Example
///
/// ```no_run
/// use triage::log_patient_registered;
/// use triage::domain::{DoctorId, PatientId, Priority};
///
/// log_patient_registered!(PatientId::new(17), DoctorId::new(2), Priority::High);
/// ```
#[macro_export]
macro_rules! log_patient_registered {
    ($patient_id:expr, $doctor_id:expr, $priority:expr) => {
        tracing::info!(
            patient_id = %$patient_id,
            doctor_id = %$doctor_id,
            priority = %$priority,
            "Patient registered"
        );
    };
}

/// Log a case being closed out
///
/// # Example
///
/// ```no_run
/// use triage::log_patient_completed;
/// use triage::domain::{DoctorId, PatientId};
///
/// log_patient_completed!(PatientId::new(17), DoctorId::new(2), "Video Call");
/// ```
#[macro_export]
macro_rules! log_patient_completed {
    ($patient_id:expr, $doctor_id:expr, $action:expr) => {
        tracing::info!(
            patient_id = %$patient_id,
            doctor_id = %$doctor_id,
            action = %$action,
            "Patient marked as done"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use triage::log_error_with_context;
/// use triage::domain::TriageError;
///
/// let error = TriageError::Storage("disk full".to_string());
/// log_error_with_context!(&error, "Failed to persist patients");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
