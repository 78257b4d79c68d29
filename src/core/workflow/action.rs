//! Doctor actions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the doctor decided to do for a patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "Video Call")]
    VideoCall,
    #[serde(rename = "Refer to Hospital")]
    ReferToHospital,
    #[serde(rename = "Medicine Prescription")]
    MedicinePrescription,
}

impl Action {
    pub const ALL: [Action; 3] = [
        Action::VideoCall,
        Action::ReferToHospital,
        Action::MedicinePrescription,
    ];

    /// Label shown to staff
    pub fn label(self) -> &'static str {
        match self {
            Action::VideoCall => "Video Call",
            Action::ReferToHospital => "Refer to Hospital",
            Action::MedicinePrescription => "Medicine Prescription",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = String;

    /// Accepts the label or a short kebab-case name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "video call" | "video" => Ok(Action::VideoCall),
            "refer to hospital" | "refer" | "referral" => Ok(Action::ReferToHospital),
            "medicine prescription" | "prescription" | "prescribe" => {
                Ok(Action::MedicinePrescription)
            }
            _ => Err(format!(
                "Invalid action '{s}'. Must be one of: video-call, refer, prescription"
            )),
        }
    }
}

/// Action state of the selected patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    NoAction,
    ActionChosen(Action),
}

impl ActionState {
    pub fn action(self) -> Option<Action> {
        match self {
            ActionState::NoAction => None,
            ActionState::ActionChosen(action) => Some(action),
        }
    }
}
