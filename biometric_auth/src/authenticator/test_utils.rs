//! Test utilities for authenticator module tests

use super::facade::BiometricAuthenticator;
use crate::platform::{Modality, SimulatedProvider};

/// Build an authenticator over a simulated platform reporting `modality`.
///
/// Returns the platform clone used for scripting and inspection.
pub(crate) async fn simulated(
    modality: Modality,
    reason: &str,
) -> (BiometricAuthenticator, SimulatedProvider) {
    let platform = SimulatedProvider::new(modality);
    let authenticator = BiometricAuthenticator::with_reason(platform.clone(), reason).await;
    (authenticator, platform)
}
