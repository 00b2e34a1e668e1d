use async_trait::async_trait;

use super::errors::{BiometricError, PlatformError};
use super::types::{Modality, SecurityContext, SecurityContextProvider};

/// Backend for hosts without a biometric service.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedProvider;

struct UnsupportedContext;

impl SecurityContextProvider for UnsupportedProvider {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn create_context(&self) -> Box<dyn SecurityContext> {
        Box::new(UnsupportedContext)
    }
}

#[async_trait]
impl SecurityContext for UnsupportedContext {
    async fn can_evaluate_policy(&mut self) -> Result<Modality, PlatformError> {
        Err(BiometricError::BiometryNotAvailable.into())
    }

    fn set_fallback_title(&mut self, _title: &str) {}

    async fn evaluate_policy(&mut self, _reason: &str) -> Result<bool, PlatformError> {
        Err(BiometricError::BiometryNotAvailable.into())
    }
}
