//! Location permission state

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// The user has not been asked yet
    #[default]
    Undetermined,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        *self == PermissionState::Granted
    }
}
