use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::PlatformError;

/// Kind of biometric sensor reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    #[default]
    None,
    Fingerprint,
    Face,
    Iris,
    /// A sensor is present but the platform does not say which kind
    Unknown,
}

impl Modality {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Fingerprint => "Fingerprint",
            Self::Face => "Face",
            Self::Iris => "Iris",
            Self::Unknown => "Unknown",
        }
    }

    /// True when the platform reported some sensor at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One handle on the platform security service.
///
/// A fresh context is created for every platform operation and dropped
/// afterwards; implementations may keep per-context settings such as the
/// fallback title.
#[async_trait]
pub trait SecurityContext: Send {
    /// Whether a biometric policy can be evaluated right now.
    ///
    /// Returns the modality present on success. `Modality::None` means the
    /// platform answered but has no sensor to offer.
    async fn can_evaluate_policy(&mut self) -> Result<Modality, PlatformError>;

    /// Label of the non-biometric fallback button. Empty hides it.
    fn set_fallback_title(&mut self, title: &str);

    /// Present the biometric challenge and wait for the user.
    ///
    /// `Ok(false)` means the platform finished without authenticating and
    /// without naming a reason.
    async fn evaluate_policy(&mut self, reason: &str) -> Result<bool, PlatformError>;
}

/// Factory for [`SecurityContext`] handles.
pub trait SecurityContextProvider: Send + Sync + 'static {
    /// Short backend name used in logs
    fn name(&self) -> &'static str;

    fn create_context(&self) -> Box<dyn SecurityContext>;
}
