mod authenticate;
mod facade;
mod probe;
mod state;
mod types;

#[cfg(test)]
mod test_utils;

pub use facade::BiometricAuthenticator;
pub use types::{AuthState, Availability};
