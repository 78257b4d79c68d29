//! Domain error types
//!
//! Every fallible operation in the crate returns [`TriageError`]. None of the
//! variants is fatal: callers recover at the failing operation and report the
//! error to whoever issued the command.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Main triage error type
#[derive(Debug, Error)]
pub enum TriageError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Field-level input validation failures, collected rather than short-circuited
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// An operation was attempted before its precondition held
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The referenced record is no longer present
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence backend errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl TriageError {
    /// True for errors caused by the command itself rather than the environment
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TriageError::Validation(_) | TriageError::Precondition(_) | TriageError::NotFound(_)
        )
    }
}

/// Registration form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Age,
    Details,
    DoctorId,
}

impl Field {
    /// Field name as shown on the registration form
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Age => "age",
            Field::Details => "details",
            Field::DoctorId => "doctorId",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single invalid field with its user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All field errors found while validating one input
///
/// # Examples
///
/// ```
/// use triage::domain::errors::{Field, ValidationErrors};
///
/// let mut errors = ValidationErrors::default();
/// errors.push(Field::Name, "Name is required");
/// errors.push(Field::Age, "Age is required");
///
/// assert!(errors.contains(Field::Name));
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Records a failure for `field`
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether `field` has at least one failure
    pub fn contains(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Message recorded for `field`, if any
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Invalid fields in the order they were checked
    pub fn fields(&self) -> Vec<Field> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Converts into `Err` when any failure was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<std::io::Error> for TriageError {
    fn from(err: std::io::Error) -> Self {
        TriageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TriageError {
    fn from(err: serde_json::Error) -> Self {
        TriageError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for TriageError {
    fn from(err: toml::de::Error) -> Self {
        TriageError::Configuration(format!("TOML parse error: {err}"))
    }
}
