//! Central configuration for the biometric_auth crate

use std::sync::LazyLock;

/// Prompt reason used when nothing else is configured
pub const DEFAULT_PROMPT_REASON: &str = "Use biometrics to authenticate";

/// Prompt reason shown by the platform during authentication
///
/// Default: "Use biometrics to authenticate"
pub static BIOMETRIC_PROMPT_REASON: LazyLock<String> =
    LazyLock::new(|| prompt_reason(std::env::var("BIOMETRIC_PROMPT_REASON").ok()));

fn prompt_reason(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROMPT_REASON.to_string())
}
