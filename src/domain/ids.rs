//! Domain identifier types
//!
//! Doctors, medicines and patients are all identified by plain integers in
//! persisted state. The newtypes below keep them from being mixed up in code.

use super::errors::TriageError;
use super::result::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw id value
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw id value
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| format!("Invalid {} id: {}", $label, s))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a doctor in the catalog
    ///
    /// # Examples
    ///
    /// ```
    /// use triage::domain::ids::DoctorId;
    /// use std::str::FromStr;
    ///
    /// let id = DoctorId::from_str("2").unwrap();
    /// assert_eq!(id, DoctorId::new(2));
    /// ```
    DoctorId,
    "doctor"
);

numeric_id!(
    /// Identifier of a medicine in the catalog
    MedicineId,
    "medicine"
);

numeric_id!(
    /// Identifier of a registered patient
    PatientId,
    "patient"
);

/// Monotonic patient id generator
///
/// Ids are seeded from the wall clock in milliseconds, but every id handed out
/// is strictly greater than the previous one, so two registrations within the
/// same millisecond still get distinct ids.
#[derive(Debug, Clone, Default)]
pub struct PatientIdGenerator {
    last: u64,
}

impl PatientIdGenerator {
    /// Creates a generator that never returns an id at or below `floor`
    ///
    /// Used after restoring persisted patients so new ids stay above every
    /// id already in the registry.
    pub fn starting_after(floor: u64) -> Self {
        Self { last: floor }
    }

    /// Returns the next id
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Other`] once the last id handed out (or the
    /// restored floor) is `u64::MAX`; the generator never repeats an id.
    pub fn next_id(&mut self) -> Result<PatientId> {
        let after = self.last.checked_add(1).ok_or_else(|| {
            TriageError::Other(format!("Patient id space exhausted after {}", self.last))
        })?;
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(after);
        Ok(PatientId(self.last))
    }
}
