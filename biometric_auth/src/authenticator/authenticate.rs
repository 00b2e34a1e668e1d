use super::facade::BiometricAuthenticator;
use crate::platform::{BiometricError, PlatformError};

impl BiometricAuthenticator {
    /// Present the platform biometric challenge.
    ///
    /// Returns `true` when the user authenticated. Platform failures are
    /// published as the current error and yield `false`. Failures outside the
    /// platform taxonomy are logged and yield `false` without touching the
    /// published error; use [`try_authenticate`](Self::try_authenticate) to
    /// see them.
    pub async fn authenticate(&self) -> bool {
        self.try_authenticate().await.is_ok()
    }

    /// Same as [`authenticate`](Self::authenticate), returning the failure.
    ///
    /// State effects are identical: a prior error is never cleared on success.
    pub async fn try_authenticate(&self) -> Result<(), PlatformError> {
        if !self.is_available() {
            tracing::warn!("Biometric authentication requested while unavailable");
            self.state
                .publish_error(BiometricError::BiometryNotAvailable);
            return Err(BiometricError::BiometryNotAvailable.into());
        }

        let reason = self.localized_reason();

        // Outcome is published before the platform is released so the
        // published error always belongs to the last completed challenge
        let provider = self.platform.lock().await;
        let mut context = provider.create_context();
        context.set_fallback_title("");

        tracing::debug!("Evaluating biometric policy with reason {:?}", reason);

        let result = match context.evaluate_policy(&reason).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(PlatformError::from(BiometricError::AuthenticationFailed)),
            Err(e) => Err(e),
        };

        match &result {
            Ok(()) => {
                tracing::info!("Biometric authentication succeeded");
            }
            Err(PlatformError::Biometric(error)) => {
                tracing::info!("Biometric authentication failed: {}", error);
                self.state.publish_error(error.clone());
            }
            Err(e) => {
                tracing::error!("Unexpected error during biometric authentication: {}", e);
            }
        }

        drop(context);
        drop(provider);
        result
    }
}
