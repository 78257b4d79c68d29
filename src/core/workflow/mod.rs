//! Action workflow
//!
//! Per-patient state machine from selection to completion, plus the
//! notifications it posts along the way.

pub mod action;
pub mod machine;
pub mod notification;

pub use action::{Action, ActionState};
pub use machine::ActionWorkflow;
pub use notification::{Notification, NotificationCenter, NotificationKind};
