//! Start-up load report

use serde::Serialize;
use std::path::PathBuf;

/// Outcome of restoring the persisted patient collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Records that became pending patients
    pub restored: usize,
    /// Records rejected by validation (shape, unknown doctor, duplicate id)
    pub dropped: usize,
    /// The stored value was present but not a JSON array of records, or the
    /// backing file could not be parsed at all
    pub unreadable: bool,
    /// Where the unparseable backing file was moved
    pub quarantined: Option<PathBuf>,
}

impl LoadReport {
    /// True when every stored record was restored
    pub fn is_clean(&self) -> bool {
        self.dropped == 0 && !self.unreadable
    }
}
