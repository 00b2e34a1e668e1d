use std::time::Duration;

use biometric_auth::{AuthState, BiometricError, Modality, SimulatedOutcome};
use tokio::time::timeout;

use crate::common::TestPlatform;

const WAIT: Duration = Duration::from_secs(1);

#[tokio::test]
async fn test_subscriber_sees_published_error() {
    let test = TestPlatform::with_modality(Modality::Fingerprint).await;
    let mut rx = test.authenticator.subscribe();
    test.platform
        .push_outcome(SimulatedOutcome::Failure(BiometricError::AuthenticationFailed));

    test.authenticator.authenticate().await;

    timeout(WAIT, rx.changed()).await.unwrap().unwrap();
    let state = rx.borrow_and_update().clone();
    assert_eq!(
        state,
        AuthState {
            modality: Modality::Fingerprint,
            is_available: true,
            has_error: true,
            error: Some(BiometricError::AuthenticationFailed),
        }
    );
}

#[tokio::test]
async fn test_subscriber_sees_reset_and_reprobe() {
    let test = TestPlatform::with_modality(Modality::Face).await;
    test.platform
        .push_outcome(SimulatedOutcome::Failure(BiometricError::UserCancel));
    test.authenticator.authenticate().await;

    let mut rx = test.authenticator.subscribe();
    assert!(rx.borrow().has_error);

    test.authenticator.reset_error();
    timeout(WAIT, rx.changed()).await.unwrap().unwrap();
    assert!(!rx.borrow_and_update().has_error);

    test.platform.set_probe_error(BiometricError::BiometryNotAvailable);
    test.authenticator.probe().await;
    timeout(WAIT, rx.changed()).await.unwrap().unwrap();
    let state = rx.borrow_and_update().clone();
    assert!(!state.is_available);
    assert_eq!(state.modality, Modality::None);
}

#[tokio::test]
async fn test_successful_authentication_leaves_state_unchanged() {
    let test = TestPlatform::with_modality(Modality::Face).await;
    let rx = test.authenticator.subscribe();
    let before = test.authenticator.state();

    assert!(test.authenticator.authenticate().await);

    assert!(!rx.has_changed().unwrap());
    assert_eq!(test.authenticator.state(), before);
}

#[tokio::test]
async fn test_state_json_for_ui_binding() {
    let test = TestPlatform::with_modality(Modality::Iris).await;
    test.platform
        .push_outcome(SimulatedOutcome::Failure(BiometricError::BiometryNotEnrolled));
    test.authenticator.authenticate().await;

    let json = serde_json::to_value(test.authenticator.state()).unwrap();

    assert_eq!(json["modality"], "iris");
    assert_eq!(json["is_available"], true);
    assert_eq!(json["has_error"], true);
    assert_eq!(json["error"]["kind"], "biometry_not_enrolled");
}
