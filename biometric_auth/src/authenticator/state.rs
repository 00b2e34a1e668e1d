use tokio::sync::watch;

use super::types::{AuthState, Availability};
use crate::platform::BiometricError;

/// Owner of the observable [`AuthState`].
///
/// Every mutation goes through `send_modify`, which updates the value even
/// when nobody is subscribed and marks it changed for all receivers.
pub(super) struct StatePublisher {
    tx: watch::Sender<AuthState>,
}

impl StatePublisher {
    pub(super) fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::default());
        Self { tx }
    }

    pub(super) fn snapshot(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    pub(super) fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    pub(super) fn publish_availability(&self, availability: Availability) {
        self.tx.send_modify(|state| {
            state.is_available = availability.available;
            state.modality = availability.modality;
        });
    }

    pub(super) fn publish_error(&self, error: BiometricError) {
        self.tx.send_modify(|state| {
            state.has_error = true;
            state.error = Some(error);
        });
    }

    pub(super) fn reset_error(&self) {
        self.tx.send_modify(|state| {
            state.has_error = false;
            state.error = None;
        });
    }
}
