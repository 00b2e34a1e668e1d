use biometric_auth::{BiometricError, Modality, PlatformError, SimulatedOutcome};

use crate::common::{TEST_REASON, TestPlatform};

#[tokio::test]
async fn test_unavailable_platform_is_never_challenged() {
    let test = TestPlatform::unavailable().await;

    assert!(!test.authenticator.authenticate().await);

    assert!(test.authenticator.has_error());
    assert_eq!(
        test.authenticator.error(),
        Some(BiometricError::BiometryNotAvailable)
    );
    assert_eq!(test.platform.evaluate_calls(), 0);
    assert!(test.platform.prompts().is_empty());
}

#[tokio::test]
async fn test_successful_authentication() {
    let test = TestPlatform::with_modality(Modality::Face).await;

    assert!(test.authenticator.authenticate().await);

    assert!(!test.authenticator.has_error());
    assert_eq!(test.platform.prompts(), vec![TEST_REASON]);
}

#[tokio::test]
async fn test_lockout_is_translated() {
    let test = TestPlatform::with_modality(Modality::Fingerprint).await;
    test.platform
        .push_outcome(SimulatedOutcome::Failure(BiometricError::BiometryLockout));

    assert!(!test.authenticator.authenticate().await);

    assert!(test.authenticator.has_error());
    assert_eq!(
        test.authenticator.error_description().as_deref(),
        Some("Biometric authentication is locked out due to too many failed attempts.")
    );
}

#[tokio::test]
async fn test_changed_reason_reaches_platform() {
    let test = TestPlatform::with_modality(Modality::Fingerprint).await;

    test.authenticator.change_localized_reason("X");
    test.authenticator.authenticate().await;

    assert_eq!(test.platform.prompts(), vec!["X"]);
}

#[tokio::test]
async fn test_reason_is_read_per_call() {
    let test = TestPlatform::with_modality(Modality::Fingerprint).await;

    test.authenticator.authenticate().await;
    test.authenticator.change_localized_reason("Approve payment");
    test.authenticator.authenticate().await;

    assert_eq!(test.platform.prompts(), vec![TEST_REASON, "Approve payment"]);
}

#[tokio::test]
async fn test_reset_error_clears_any_prior_state() {
    let test = TestPlatform::with_modality(Modality::Fingerprint).await;

    // Nothing to clear
    test.authenticator.reset_error();
    assert!(!test.authenticator.has_error());
    assert!(test.authenticator.error().is_none());

    test.platform
        .push_outcome(SimulatedOutcome::Failure(BiometricError::UserFallback));
    test.authenticator.authenticate().await;
    assert!(test.authenticator.has_error());

    test.authenticator.reset_error();
    assert!(!test.authenticator.has_error());
    assert!(test.authenticator.error().is_none());
    assert!(test.authenticator.error_description().is_none());
    // Availability untouched
    assert!(test.authenticator.is_available());
}

#[tokio::test]
async fn test_every_named_failure_is_published() {
    let failures = [
        BiometricError::AuthenticationFailed,
        BiometricError::UserCancel,
        BiometricError::UserFallback,
        BiometricError::BiometryNotAvailable,
        BiometricError::BiometryNotEnrolled,
        BiometricError::BiometryLockout,
    ];

    let test = TestPlatform::with_modality(Modality::Fingerprint).await;
    for failure in failures {
        test.platform
            .push_outcome(SimulatedOutcome::Failure(failure.clone()));

        assert!(!test.authenticator.authenticate().await);
        assert_eq!(test.authenticator.error(), Some(failure.clone()));
        assert_eq!(
            test.authenticator.error_description(),
            Some(failure.description())
        );
    }
}

#[tokio::test]
async fn test_other_platform_code_uses_platform_description() {
    let test = TestPlatform::with_modality(Modality::Face).await;
    test.platform
        .push_outcome(SimulatedOutcome::Failure(BiometricError::from_code(
            -4,
            "Authentication was cancelled by the system.",
        )));

    assert!(!test.authenticator.authenticate().await);
    assert_eq!(
        test.authenticator.error_description().as_deref(),
        Some("Authentication was cancelled by the system.")
    );
}

#[tokio::test]
async fn test_unexpected_failure_is_logged_only() {
    let test = TestPlatform::with_modality(Modality::Face).await;
    test.platform
        .push_outcome(SimulatedOutcome::Unexpected("context invalidated".to_string()));

    assert!(!test.authenticator.authenticate().await);
    assert!(!test.authenticator.has_error());

    test.platform
        .push_outcome(SimulatedOutcome::Unexpected("context invalidated".to_string()));
    let result = test.authenticator.try_authenticate().await;
    assert!(matches!(result, Err(PlatformError::Unexpected(_))));
}
