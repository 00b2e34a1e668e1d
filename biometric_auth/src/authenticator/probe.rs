use super::facade::BiometricAuthenticator;
use super::types::Availability;
use crate::platform::{Modality, PlatformError};

impl BiometricAuthenticator {
    /// Ask the platform whether biometrics can be evaluated and publish the answer.
    ///
    /// Runs once during construction. Call it again to pick up enrollment
    /// changes made outside the application. Platform failures never reach
    /// the caller; they are reported as unavailable with `Modality::None`.
    pub async fn probe(&self) -> Availability {
        let availability = match self.can_evaluate_policy().await {
            Ok(modality) => Availability::from_modality(modality),
            Err(e) => {
                tracing::warn!("Biometric authentication unavailable: {}", e);
                Availability::UNAVAILABLE
            }
        };

        tracing::debug!(
            "Probed availability: available={}, modality={}",
            availability.available,
            availability.modality
        );

        self.state.publish_availability(availability);
        availability
    }

    async fn can_evaluate_policy(&self) -> Result<Modality, PlatformError> {
        let provider = self.platform.lock().await;
        let mut context = provider.create_context();
        context.can_evaluate_policy().await
    }
}
