//! Storage backend factory

use super::file::FileStore;
use super::memory::MemoryStore;
use super::traits::KeyValueStore;
use crate::config::schema::{StorageBackend, StorageConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Create a key-value store based on the configuration
///
/// # Errors
///
/// Returns an error if the file backend's directory cannot be created.
pub fn create_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::File => {
            tracing::debug!(path = %config.path, "Opening file store");
            Ok(Arc::new(FileStore::open(&config.path)?) as Arc<dyn KeyValueStore>)
        }
        StorageBackend::Memory => {
            tracing::debug!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore>)
        }
    }
}
