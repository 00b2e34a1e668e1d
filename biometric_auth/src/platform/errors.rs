use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platform error codes, numbered the way LocalAuthentication numbers them.
pub(crate) const CODE_AUTHENTICATION_FAILED: i64 = -1;
pub(crate) const CODE_USER_CANCEL: i64 = -2;
pub(crate) const CODE_USER_FALLBACK: i64 = -3;
pub(crate) const CODE_BIOMETRY_NOT_AVAILABLE: i64 = -6;
pub(crate) const CODE_BIOMETRY_NOT_ENROLLED: i64 = -7;
pub(crate) const CODE_BIOMETRY_LOCKOUT: i64 = -8;

const UNKNOWN_ERROR_DESCRIPTION: &str = "An unknown authentication error occurred.";

/// Failure reported by the platform security service.
///
/// This is the structured error record published by the authenticator. Its
/// `Display` output is the human-readable text shown to end users, so the
/// enum doubles as the error translator.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BiometricError {
    /// The presented biometric did not match
    #[error("There was a problem verifying your identity.")]
    AuthenticationFailed,

    /// The user dismissed the platform prompt
    #[error("You cancelled the authentication.")]
    UserCancel,

    /// The user picked the non-biometric fallback
    #[error("You chose to use a different authentication method.")]
    UserFallback,

    /// No usable biometric sensor
    #[error("Biometric authentication is not available on this device.")]
    BiometryNotAvailable,

    /// Sensor present but nothing enrolled
    #[error("No biometric identities are enrolled on this device.")]
    BiometryNotEnrolled,

    /// Too many failed attempts
    #[error("Biometric authentication is locked out due to too many failed attempts.")]
    BiometryLockout,

    /// Any other platform code, carrying the platform's own description
    #[error("{}", describe_other(.description))]
    Other { code: i64, description: String },
}

fn describe_other(description: &str) -> &str {
    if description.trim().is_empty() {
        UNKNOWN_ERROR_DESCRIPTION
    } else {
        description
    }
}

impl BiometricError {
    /// Map a platform error code to its structured error.
    ///
    /// `platform_description` is only kept for codes outside the named cases.
    pub fn from_code(code: i64, platform_description: &str) -> Self {
        match code {
            CODE_AUTHENTICATION_FAILED => Self::AuthenticationFailed,
            CODE_USER_CANCEL => Self::UserCancel,
            CODE_USER_FALLBACK => Self::UserFallback,
            CODE_BIOMETRY_NOT_AVAILABLE => Self::BiometryNotAvailable,
            CODE_BIOMETRY_NOT_ENROLLED => Self::BiometryNotEnrolled,
            CODE_BIOMETRY_LOCKOUT => Self::BiometryLockout,
            code => Self::Other {
                code,
                description: platform_description.to_string(),
            },
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::AuthenticationFailed => CODE_AUTHENTICATION_FAILED,
            Self::UserCancel => CODE_USER_CANCEL,
            Self::UserFallback => CODE_USER_FALLBACK,
            Self::BiometryNotAvailable => CODE_BIOMETRY_NOT_AVAILABLE,
            Self::BiometryNotEnrolled => CODE_BIOMETRY_NOT_ENROLLED,
            Self::BiometryLockout => CODE_BIOMETRY_LOCKOUT,
            Self::Other { code, .. } => *code,
        }
    }

    /// Human-readable text for end users. Never empty.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

/// Translate a raw platform error code into user-facing text.
pub fn describe_error_code(code: i64, platform_description: &str) -> String {
    BiometricError::from_code(code, platform_description).description()
}

/// Errors surfaced by platform backends.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failure inside the platform's error taxonomy
    #[error(transparent)]
    Biometric(#[from] BiometricError),

    /// Failure outside the taxonomy (malformed output, broken backend)
    #[error("Unexpected platform failure: {0}")]
    Unexpected(String),

    /// Error talking to the platform service process
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlatformError {
    /// The structured error, when the failure belongs to the platform taxonomy.
    pub fn biometric(&self) -> Option<&BiometricError> {
        match self {
            Self::Biometric(e) => Some(e),
            _ => None,
        }
    }
}
