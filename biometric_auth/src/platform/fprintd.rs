use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use which::which;

use super::config::{BIOMETRIC_FPRINTD_FINGER, BIOMETRIC_FPRINTD_USER};
use super::errors::{BiometricError, PlatformError};
use super::types::{Modality, SecurityContext, SecurityContextProvider};

const LIST_TOOL: &str = "fprintd-list";
const VERIFY_TOOL: &str = "fprintd-verify";

/// Code used for fprintd results that have no named counterpart
const CODE_FPRINTD_FAILURE: i64 = -1000;

/// Linux fingerprint backend driving the fprintd command line tools.
#[derive(Debug, Clone)]
pub struct FprintdProvider {
    user: String,
    finger: String,
}

impl FprintdProvider {
    /// Provider configured from `BIOMETRIC_FPRINTD_USER` / `BIOMETRIC_FPRINTD_FINGER`
    pub fn new() -> Self {
        Self {
            user: BIOMETRIC_FPRINTD_USER.clone(),
            finger: BIOMETRIC_FPRINTD_FINGER.clone(),
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_finger(mut self, finger: impl Into<String>) -> Self {
        self.finger = finger.into();
        self
    }

    /// Whether `fprintd-verify` can be found on `PATH`
    pub fn is_installed() -> bool {
        find_tool(VERIFY_TOOL).is_some()
    }
}

impl Default for FprintdProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityContextProvider for FprintdProvider {
    fn name(&self) -> &'static str {
        "fprintd"
    }

    fn create_context(&self) -> Box<dyn SecurityContext> {
        Box::new(FprintdContext {
            user: self.user.clone(),
            finger: self.finger.clone(),
            fallback_title: None,
        })
    }
}

struct FprintdContext {
    user: String,
    finger: String,
    fallback_title: Option<String>,
}

impl FprintdContext {
    /// Configured user, or the login name of the calling process
    fn list_user(&self) -> String {
        if self.user.is_empty() {
            whoami::username()
        } else {
            self.user.clone()
        }
    }
}

#[async_trait]
impl SecurityContext for FprintdContext {
    async fn can_evaluate_policy(&mut self) -> Result<Modality, PlatformError> {
        let Some(list) = find_tool(LIST_TOOL) else {
            tracing::warn!("{} not found on PATH", LIST_TOOL);
            return Err(BiometricError::BiometryNotAvailable.into());
        };

        // fprintd-list has no default user
        let user = self.list_user();
        if user.is_empty() {
            return Err(PlatformError::Unexpected(format!(
                "Could not determine a user for {LIST_TOOL}"
            )));
        }

        let (output, _) = run(&list, &[user.as_str()]).await?;
        parse_list_output(&output)
    }

    fn set_fallback_title(&mut self, title: &str) {
        // fprintd has no fallback affordance; kept for logging only
        self.fallback_title = Some(title.to_string());
    }

    async fn evaluate_policy(&mut self, reason: &str) -> Result<bool, PlatformError> {
        let Some(verify) = find_tool(VERIFY_TOOL) else {
            tracing::warn!("{} not found on PATH", VERIFY_TOOL);
            return Err(BiometricError::BiometryNotAvailable.into());
        };

        tracing::info!("fprintd verify prompt: {}", reason);
        tracing::debug!(
            "fprintd verify: user={:?}, finger={}, fallback title={:?}",
            self.user,
            self.finger,
            self.fallback_title
        );

        let mut args = vec!["-f", self.finger.as_str()];
        if !self.user.is_empty() {
            args.push(self.user.as_str());
        }

        let (output, exit_code) = run(&verify, &args).await?;
        parse_verify_output(&output, exit_code)
    }
}

fn find_tool(name: &str) -> Option<PathBuf> {
    which(name).ok()
}

/// Run a tool and return its combined stdout/stderr and exit code.
///
/// The exit code is `None` when the process was killed by a signal. Dropping
/// the returned future kills the child.
async fn run(binary: &Path, args: &[&str]) -> Result<(String, Option<i32>), PlatformError> {
    tracing::debug!("executing {} {:?}", binary.display(), args);

    let out = match Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
    {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("{} failed with {}", binary.display(), e);
            return Err(e.into());
        }
    };

    let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&out.stderr));

    tracing::debug!("{} exited with {:?}: {}", binary.display(), out.status.code(), text.trim());

    Ok((text, out.status.code()))
}

fn parse_list_output(output: &str) -> Result<Modality, PlatformError> {
    if output.contains("No devices available") {
        return Err(BiometricError::BiometryNotAvailable.into());
    }
    if output.contains("no fingers enrolled") {
        return Err(BiometricError::BiometryNotEnrolled.into());
    }
    if output
        .lines()
        .any(|line| line.trim_start().starts_with("- #"))
    {
        return Ok(Modality::Fingerprint);
    }

    Err(PlatformError::Unexpected(format!(
        "Unrecognised {} output: {}",
        LIST_TOOL,
        output.trim()
    )))
}

fn parse_verify_output(output: &str, exit_code: Option<i32>) -> Result<bool, PlatformError> {
    let result = output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Verify result:"))
        .last()
        .and_then(|rest| rest.split_whitespace().next());

    match result {
        Some("verify-match") => Ok(true),
        Some("verify-no-match") => Err(BiometricError::AuthenticationFailed.into()),
        Some("verify-disconnected") => Err(BiometricError::BiometryNotAvailable.into()),
        Some(other) => Err(BiometricError::Other {
            code: exit_code.map_or(CODE_FPRINTD_FAILURE, i64::from),
            description: format!("Fingerprint reader reported {other}."),
        }
        .into()),
        None if exit_code.is_none() => Err(BiometricError::UserCancel.into()),
        None if output.contains("No devices available") => {
            Err(BiometricError::BiometryNotAvailable.into())
        }
        None if output.contains("NoEnrolledPrints") || output.contains("no fingers enrolled") => {
            Err(BiometricError::BiometryNotEnrolled.into())
        }
        None => Err(PlatformError::Unexpected(format!(
            "{} produced no result: {}",
            VERIFY_TOOL,
            output.trim()
        ))),
    }
}
