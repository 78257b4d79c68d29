//! Patient registry and its persistence

pub mod manager;
pub mod report;

pub use manager::PatientRegistry;
pub use report::LoadReport;
