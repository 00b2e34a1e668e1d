//! In-process platform double.
//!
//! `SimulatedProvider` answers probes and challenges from a script instead of
//! a sensor and records everything the authenticator asked of it. Clones share
//! the same script, so a test can keep one clone for inspection after handing
//! another to the authenticator.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::config::{BIOMETRIC_SIMULATED_ERROR_CODE, BIOMETRIC_SIMULATED_MODALITY};
use super::errors::{BiometricError, PlatformError};
use super::types::{Modality, SecurityContext, SecurityContextProvider};

/// Scripted result of one `evaluate_policy` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedOutcome {
    Success,
    /// Platform finished without authenticating and without a reason
    Declined,
    Failure(BiometricError),
    /// Failure outside the platform taxonomy
    Unexpected(String),
}

#[derive(Debug, Clone)]
enum ProbeScript {
    Modality(Modality),
    Error(BiometricError),
    Unexpected(String),
}

#[derive(Debug)]
struct Script {
    probe: ProbeScript,
    outcomes: VecDeque<SimulatedOutcome>,
    default_outcome: SimulatedOutcome,
    latency: Duration,
    prompts: Vec<String>,
    fallback_titles: Vec<String>,
    contexts_created: usize,
    probe_calls: usize,
    evaluate_calls: usize,
}

#[derive(Debug)]
struct Shared {
    script: Mutex<Script>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    shared: Arc<Shared>,
}

impl SimulatedProvider {
    /// Platform with a sensor of the given modality where every challenge succeeds
    pub fn new(modality: Modality) -> Self {
        Self::with_probe(ProbeScript::Modality(modality))
    }

    /// Platform whose probe fails with `BiometryNotAvailable`
    pub fn unavailable() -> Self {
        Self::with_probe(ProbeScript::Error(BiometricError::BiometryNotAvailable))
    }

    /// Configured from `BIOMETRIC_SIMULATED_MODALITY` / `BIOMETRIC_SIMULATED_ERROR_CODE`
    pub fn from_env() -> Self {
        let provider = Self::new(*BIOMETRIC_SIMULATED_MODALITY);
        if let Some(code) = *BIOMETRIC_SIMULATED_ERROR_CODE {
            provider.set_default_outcome(SimulatedOutcome::Failure(BiometricError::from_code(
                code,
                "Simulated platform failure.",
            )));
        }
        provider
    }

    fn with_probe(probe: ProbeScript) -> Self {
        Self {
            shared: Arc::new(Shared {
                script: Mutex::new(Script {
                    probe,
                    outcomes: VecDeque::new(),
                    default_outcome: SimulatedOutcome::Success,
                    latency: Duration::ZERO,
                    prompts: Vec::new(),
                    fallback_titles: Vec::new(),
                    contexts_created: 0,
                    probe_calls: 0,
                    evaluate_calls: 0,
                }),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }),
        }
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.shared
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_modality(&self, modality: Modality) {
        self.script().probe = ProbeScript::Modality(modality);
    }

    pub fn set_probe_error(&self, error: BiometricError) {
        self.script().probe = ProbeScript::Error(error);
    }

    pub fn set_probe_unexpected(&self, message: impl Into<String>) {
        self.script().probe = ProbeScript::Unexpected(message.into());
    }

    /// Queue the outcome of the next unscripted challenge
    pub fn push_outcome(&self, outcome: SimulatedOutcome) {
        self.script().outcomes.push_back(outcome);
    }

    /// Outcome used once the queue is empty
    pub fn set_default_outcome(&self, outcome: SimulatedOutcome) {
        self.script().default_outcome = outcome;
    }

    /// Delay applied to every platform call
    pub fn set_latency(&self, latency: Duration) {
        self.script().latency = latency;
    }

    /// Prompt reasons passed to `evaluate_policy`, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.script().prompts.clone()
    }

    pub fn fallback_titles(&self) -> Vec<String> {
        self.script().fallback_titles.clone()
    }

    pub fn contexts_created(&self) -> usize {
        self.script().contexts_created
    }

    pub fn probe_calls(&self) -> usize {
        self.script().probe_calls
    }

    pub fn evaluate_calls(&self) -> usize {
        self.script().evaluate_calls
    }

    /// Highest number of platform calls observed running at once
    pub fn max_concurrent_calls(&self) -> usize {
        self.shared.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new(Modality::Fingerprint)
    }
}

impl SecurityContextProvider for SimulatedProvider {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn create_context(&self) -> Box<dyn SecurityContext> {
        self.script().contexts_created += 1;
        Box::new(SimulatedContext {
            shared: self.shared.clone(),
        })
    }
}

struct SimulatedContext {
    shared: Arc<Shared>,
}

/// Tracks one in-flight platform call
struct InFlight<'a> {
    shared: &'a Shared,
}

impl<'a> InFlight<'a> {
    fn enter(shared: &'a Shared) -> Self {
        let now = shared.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        shared.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self { shared }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.shared.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SimulatedContext {
    fn script(&self) -> MutexGuard<'_, Script> {
        self.shared
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SecurityContext for SimulatedContext {
    async fn can_evaluate_policy(&mut self) -> Result<Modality, PlatformError> {
        let _in_flight = InFlight::enter(&self.shared);

        let (probe, latency) = {
            let mut script = self.script();
            script.probe_calls += 1;
            (script.probe.clone(), script.latency)
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        match probe {
            ProbeScript::Modality(modality) => Ok(modality),
            ProbeScript::Error(error) => Err(error.into()),
            ProbeScript::Unexpected(message) => Err(PlatformError::Unexpected(message)),
        }
    }

    fn set_fallback_title(&mut self, title: &str) {
        self.script().fallback_titles.push(title.to_string());
    }

    async fn evaluate_policy(&mut self, reason: &str) -> Result<bool, PlatformError> {
        let _in_flight = InFlight::enter(&self.shared);

        let (outcome, latency) = {
            let mut script = self.script();
            script.evaluate_calls += 1;
            script.prompts.push(reason.to_string());
            let outcome = script
                .outcomes
                .pop_front()
                .unwrap_or_else(|| script.default_outcome.clone());
            (outcome, script.latency)
        };

        tracing::debug!("Simulated challenge for {:?} -> {:?}", reason, outcome);

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        match outcome {
            SimulatedOutcome::Success => Ok(true),
            SimulatedOutcome::Declined => Ok(false),
            SimulatedOutcome::Failure(error) => Err(error.into()),
            SimulatedOutcome::Unexpected(message) => Err(PlatformError::Unexpected(message)),
        }
    }
}
