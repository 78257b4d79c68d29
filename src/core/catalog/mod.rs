//! Doctor and medicine reference data

pub mod seed;
pub mod store;

pub use store::CatalogStore;
