use serde::{Deserialize, Serialize};

use crate::platform::{BiometricError, Modality};

/// Result of one availability probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    pub modality: Modality,
}

impl Availability {
    pub const UNAVAILABLE: Self = Self {
        available: false,
        modality: Modality::None,
    };

    /// Availability for a platform answer; `Modality::None` means unavailable.
    pub fn from_modality(modality: Modality) -> Self {
        if modality.is_present() {
            Self {
                available: true,
                modality,
            }
        } else {
            Self::UNAVAILABLE
        }
    }
}

/// Observable state of a [`BiometricAuthenticator`](crate::BiometricAuthenticator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    pub modality: Modality,
    pub is_available: bool,
    pub has_error: bool,
    pub error: Option<BiometricError>,
}

impl AuthState {
    /// Human-readable text for the current error, if any
    pub fn error_description(&self) -> Option<String> {
        self.error.as_ref().map(BiometricError::description)
    }

    pub fn availability(&self) -> Availability {
        Availability {
            available: self.is_available,
            modality: self.modality,
        }
    }
}
