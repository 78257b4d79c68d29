//! Key-value storage abstraction
//!
//! The patient collection is persisted as one opaque string value under a
//! fixed namespace key. Backends only need to store and return strings.

use crate::domain::Result;
use std::path::PathBuf;

/// Key-value store trait for persisted state
///
/// Methods take `&self` so one backend can be shared between the registry and
/// whoever else needs to inspect it; implementations handle their own
/// interior mutability.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if nothing is stored under the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the write does not reach the backend.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;

    /// Where an unreadable backing file was moved on open, if that happened
    fn quarantined_file(&self) -> Option<PathBuf> {
        None
    }
}
