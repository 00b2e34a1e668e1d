use std::sync::{PoisonError, RwLock};
use tokio::sync::{Mutex, watch};

use super::state::StatePublisher;
use super::types::AuthState;
use crate::config::BIOMETRIC_PROMPT_REASON;
use crate::platform::{BiometricError, Modality, SecurityContextProvider};

/// Observable facade over the platform biometric service.
///
/// Construction probes availability once. Afterwards `authenticate` presents
/// the platform challenge and every outcome is mirrored into an
/// [`AuthState`] that UI code can poll with the getters or follow through
/// [`subscribe`](Self::subscribe).
///
/// Platform calls are serialized: the provider sits behind an async mutex
/// and a fresh security context is created for every call. The type is
/// `Send + Sync`; share it with `Arc` for concurrent callers.
pub struct BiometricAuthenticator {
    pub(super) platform: Mutex<Box<dyn SecurityContextProvider>>,
    pub(super) state: StatePublisher,
    reason: RwLock<String>,
    backend: &'static str,
}

impl BiometricAuthenticator {
    /// Create an authenticator using the configured prompt reason.
    pub async fn new<P: SecurityContextProvider>(provider: P) -> Self {
        Self::from_provider(Box::new(provider), BIOMETRIC_PROMPT_REASON.as_str()).await
    }

    pub async fn with_reason<P: SecurityContextProvider>(
        provider: P,
        reason: impl Into<String>,
    ) -> Self {
        Self::from_provider(Box::new(provider), reason).await
    }

    pub async fn from_provider(
        provider: Box<dyn SecurityContextProvider>,
        reason: impl Into<String>,
    ) -> Self {
        let backend = provider.name();
        tracing::info!("Creating biometric authenticator with {} backend", backend);

        let authenticator = Self {
            platform: Mutex::new(provider),
            state: StatePublisher::new(),
            reason: RwLock::new(reason.into()),
            backend,
        };
        authenticator.probe().await;
        authenticator
    }

    /// Name of the platform backend in use
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// Prompt text passed to the next `authenticate` call
    pub fn localized_reason(&self) -> String {
        self.reason
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn change_localized_reason(&self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::debug!("Changing localized reason to {:?}", reason);
        *self.reason.write().unwrap_or_else(PoisonError::into_inner) = reason;
    }

    pub fn modality(&self) -> Modality {
        self.state.snapshot().modality
    }

    pub fn is_available(&self) -> bool {
        self.state.snapshot().is_available
    }

    pub fn has_error(&self) -> bool {
        self.state.snapshot().has_error
    }

    pub fn error(&self) -> Option<BiometricError> {
        self.state.snapshot().error
    }

    /// Human-readable text for the last error, if any
    pub fn error_description(&self) -> Option<String> {
        self.state.snapshot().error_description()
    }

    /// Snapshot of all observable fields
    pub fn state(&self) -> AuthState {
        self.state.snapshot()
    }

    /// Receiver notified on every state mutation
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Clear the error flag and the error record.
    pub fn reset_error(&self) {
        tracing::debug!("Resetting biometric error state");
        self.state.reset_error();
    }
}

impl std::fmt::Debug for BiometricAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiometricAuthenticator")
            .field("backend", &self.backend)
            .field("reason", &self.localized_reason())
            .field("state", &self.state())
            .finish()
    }
}
