//! External system integrations.
//!
//! - [`storage`] - Key-value persistence backends (trait-based)
//!
//! # Design Pattern
//!
//! Adapters isolate the storage engine behind the [`storage::KeyValueStore`]
//! trait so the registry never depends on a concrete backend and tests can
//! swap in [`storage::MemoryStore`].
//!
//! ```rust
//! use triage::adapters::storage::{KeyValueStore, MemoryStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! store.set("triage:patients", "[]")?;
//! assert_eq!(store.get("triage:patients")?.as_deref(), Some("[]"));
//! # Ok(())
//! # }
//! ```

pub mod storage;
