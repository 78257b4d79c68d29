//! Queue view
//!
//! Filtering, sorting and search debouncing for a doctor's pending queue.

pub mod debounce;
pub mod view;

pub use debounce::{SearchDebouncer, DEFAULT_SEARCH_DEBOUNCE};
pub use view::{list_pending_for_doctor, pending_by_doctor, DoctorLoad};
