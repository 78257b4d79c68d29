//! Persistence backends
//!
//! A trait-based key-value abstraction with a JSON-file backend and an
//! in-memory backend.

pub mod factory;
pub mod file;
pub mod memory;
pub mod traits;

pub use factory::create_store;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
