//! Result type alias for triage operations

use super::errors::TriageError;

/// Result type alias using [`TriageError`] as the error type
///
/// # Examples
///
/// ```
/// use triage::domain::result::Result;
/// use triage::domain::errors::TriageError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TriageError::Precondition("no medicines selected".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TriageError>;
