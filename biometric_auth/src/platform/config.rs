use std::{env, sync::LazyLock};

use super::types::Modality;

/// Which platform backend `init()` wires up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// fprintd when installed, otherwise unsupported
    Auto,
    Fprintd,
    Simulated,
    Unsupported,
}

pub static BIOMETRIC_BACKEND: LazyLock<Backend> =
    LazyLock::new(|| parse_backend(env::var("BIOMETRIC_BACKEND").ok().as_deref()));

pub(super) static BIOMETRIC_FPRINTD_FINGER: LazyLock<String> = LazyLock::new(|| {
    parse_finger(env::var("BIOMETRIC_FPRINTD_FINGER").ok().as_deref())
});

pub(super) static BIOMETRIC_FPRINTD_USER: LazyLock<String> = LazyLock::new(|| {
    env::var("BIOMETRIC_FPRINTD_USER")
        .or_else(|_| env::var("USER"))
        .unwrap_or_default()
});

pub(super) static BIOMETRIC_SIMULATED_MODALITY: LazyLock<Modality> = LazyLock::new(|| {
    parse_modality(env::var("BIOMETRIC_SIMULATED_MODALITY").ok().as_deref())
});

/// Platform error code every simulated challenge fails with; unset means success
pub(super) static BIOMETRIC_SIMULATED_ERROR_CODE: LazyLock<Option<i64>> = LazyLock::new(|| {
    env::var("BIOMETRIC_SIMULATED_ERROR_CODE")
        .ok()
        .and_then(|v| match v.trim().parse::<i64>() {
            Ok(code) => Some(code),
            Err(_) => {
                tracing::warn!("Invalid simulated error code: {}. Ignoring", v);
                None
            }
        })
});

const FINGERS: [&str; 11] = [
    "any",
    "left-thumb",
    "left-index-finger",
    "left-middle-finger",
    "left-ring-finger",
    "left-little-finger",
    "right-thumb",
    "right-index-finger",
    "right-middle-finger",
    "right-ring-finger",
    "right-little-finger",
];

fn parse_backend(value: Option<&str>) -> Backend {
    match value {
        None => Backend::Auto,
        Some(v) => match v.to_lowercase().as_str() {
            "auto" | "" => Backend::Auto,
            "fprintd" => Backend::Fprintd,
            "simulated" => Backend::Simulated,
            "unsupported" | "none" => Backend::Unsupported,
            invalid => {
                tracing::warn!("Invalid biometric backend: {}. Using default 'auto'", invalid);
                Backend::Auto
            }
        },
    }
}

fn parse_modality(value: Option<&str>) -> Modality {
    match value {
        None => Modality::Fingerprint,
        Some(v) => match v.to_lowercase().as_str() {
            "fingerprint" => Modality::Fingerprint,
            "face" => Modality::Face,
            "iris" => Modality::Iris,
            "unknown" => Modality::Unknown,
            "none" => Modality::None,
            invalid => {
                tracing::warn!(
                    "Invalid simulated modality: {}. Using default 'fingerprint'",
                    invalid
                );
                Modality::Fingerprint
            }
        },
    }
}

fn parse_finger(value: Option<&str>) -> String {
    match value {
        None => "any".to_string(),
        Some(v) => {
            let v = v.to_lowercase();
            if FINGERS.contains(&v.as_str()) {
                v
            } else {
                tracing::warn!("Invalid fprintd finger: {}. Using default 'any'", v);
                "any".to_string()
            }
        }
    }
}
