use std::sync::Arc;
use std::time::Duration;

use biometric_auth::{BiometricAuthenticator, Modality, SimulatedProvider};

/// Prompt reason used across integration tests
pub const TEST_REASON: &str = "Confirm it's you";

/// Authenticator over a simulated platform plus the handle used to script it
pub struct TestPlatform {
    pub authenticator: BiometricAuthenticator,
    pub platform: SimulatedProvider,
}

impl TestPlatform {
    /// Platform with a sensor of the given modality
    pub async fn with_modality(modality: Modality) -> Self {
        let platform = SimulatedProvider::new(modality);
        Self::start(platform).await
    }

    /// Platform reporting no biometric support
    pub async fn unavailable() -> Self {
        Self::start(SimulatedProvider::unavailable()).await
    }

    /// Platform whose calls take `latency` to complete
    pub async fn slow(modality: Modality, latency: Duration) -> Self {
        let platform = SimulatedProvider::new(modality);
        platform.set_latency(latency);
        Self::start(platform).await
    }

    async fn start(platform: SimulatedProvider) -> Self {
        let authenticator =
            BiometricAuthenticator::with_reason(platform.clone(), TEST_REASON).await;
        Self {
            authenticator,
            platform,
        }
    }

    /// Move the authenticator behind an `Arc` for concurrent callers
    pub fn shared(self) -> (Arc<BiometricAuthenticator>, SimulatedProvider) {
        (Arc::new(self.authenticator), self.platform)
    }
}
