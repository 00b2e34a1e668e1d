mod config;
mod errors;
mod fprintd;
mod simulated;
mod types;
mod unsupported;

pub use config::{BIOMETRIC_BACKEND, Backend};
pub use errors::{BiometricError, PlatformError, describe_error_code};
pub use fprintd::FprintdProvider;
pub use simulated::{SimulatedOutcome, SimulatedProvider};
pub use types::{Modality, SecurityContext, SecurityContextProvider};
pub use unsupported::UnsupportedProvider;

/// Build the provider selected by `BIOMETRIC_BACKEND`.
pub fn provider_from_env() -> Box<dyn SecurityContextProvider> {
    provider_for(*BIOMETRIC_BACKEND)
}

pub(crate) fn provider_for(backend: Backend) -> Box<dyn SecurityContextProvider> {
    let provider: Box<dyn SecurityContextProvider> = match backend {
        Backend::Fprintd => Box::new(FprintdProvider::new()),
        Backend::Simulated => Box::new(SimulatedProvider::from_env()),
        Backend::Unsupported => Box::new(UnsupportedProvider),
        Backend::Auto if FprintdProvider::is_installed() => Box::new(FprintdProvider::new()),
        Backend::Auto => Box::new(UnsupportedProvider),
    };

    tracing::info!(
        "Selected biometric backend: {} (requested {:?})",
        provider.name(),
        backend
    );

    provider
}
