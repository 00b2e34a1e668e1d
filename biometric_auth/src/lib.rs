//! biometric_auth - Observable facade over platform biometric authentication
//!
//! This crate reports whether biometric authentication is available and which
//! sensor is present, runs the platform challenge, and mirrors every outcome
//! into observable state with user-facing error text. Matching, liveness and
//! lockout handling stay inside the operating system service.

mod authenticator;
mod config;
mod platform;

pub use authenticator::{AuthState, Availability, BiometricAuthenticator};

pub use config::{BIOMETRIC_PROMPT_REASON, DEFAULT_PROMPT_REASON};

pub use platform::{
    BIOMETRIC_BACKEND, Backend, BiometricError, FprintdProvider, Modality, PlatformError,
    SecurityContext, SecurityContextProvider, SimulatedOutcome, SimulatedProvider,
    UnsupportedProvider, describe_error_code, provider_from_env,
};

/// Build an authenticator from environment configuration
///
/// Selects the backend from `BIOMETRIC_BACKEND`, uses `BIOMETRIC_PROMPT_REASON`
/// as the prompt and probes availability once.
pub async fn init() -> BiometricAuthenticator {
    BiometricAuthenticator::from_provider(provider_from_env(), BIOMETRIC_PROMPT_REASON.as_str())
        .await
}
