//! Fingerprint authenticator facade / 指纹认证门面
//!
//! Composes the biometric gate, key/cipher provisioning and authentication
//! sessions over injected ports. A screen drives it: `prepare()` once, then
//! `start_authentication()` per attempt, `cancel()` on teardown.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fp_core::{
    ports::{BiometricCapabilityPort, FingerprintSensorPort, KeyStorePort},
    CryptoObject, GateOutcome, KeyHandle, KeySpec,
};
use tracing::{debug, info, info_span, warn};

use crate::usecases::{
    AuthenticationSession, CheckBiometricGate, KeyPolicy, ProvisionCipher, ProvisioningError,
    SessionHandle,
};

/// Why an authentication session could not be started.
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("authenticator has not been prepared")]
    NotPrepared,

    #[error("biometric authentication not ready: {0}")]
    NotReady(GateOutcome),

    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),
}

/// Dependency grouping for [`FingerprintAuthenticator`] (parameter grouping only).
///
/// 认证门面的依赖分组（仅参数打包，无默认值）。
pub struct FingerprintAuthenticatorDeps {
    pub capabilities: Arc<dyn BiometricCapabilityPort>,
    pub key_store: Arc<dyn KeyStorePort>,
    pub sensor: Arc<dyn FingerprintSensorPort>,
    pub key_spec: KeySpec,
    pub key_policy: KeyPolicy,
}

#[derive(Default)]
struct State {
    outcome: Option<GateOutcome>,
    provisioning_failure: Option<ProvisioningError>,
    key: Option<KeyHandle>,
    /// Cipher from the last preparation, consumed by the first attempt.
    crypto: Option<CryptoObject>,
    active: Option<SessionHandle>,
}

impl State {
    fn cancel_active(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel();
        }
    }
}

pub struct FingerprintAuthenticator {
    gate: CheckBiometricGate,
    provision: ProvisionCipher,
    sensor: Arc<dyn FingerprintSensorPort>,
    state: Mutex<State>,
}

impl FingerprintAuthenticator {
    pub fn new(
        capabilities: Arc<dyn BiometricCapabilityPort>,
        key_store: Arc<dyn KeyStorePort>,
        sensor: Arc<dyn FingerprintSensorPort>,
        key_spec: KeySpec,
        key_policy: KeyPolicy,
    ) -> Self {
        Self {
            gate: CheckBiometricGate::new(capabilities),
            provision: ProvisionCipher::new(key_store, key_spec, key_policy),
            sensor,
            state: Mutex::new(State::default()),
        }
    }

    pub fn from_deps(deps: FingerprintAuthenticatorDeps) -> Self {
        Self::new(
            deps.capabilities,
            deps.key_store,
            deps.sensor,
            deps.key_spec,
            deps.key_policy,
        )
    }

    // State holds no invariants spanning an await; recover from poisoning.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Evaluate the gate, then provision the key and cipher.
    ///
    /// Cancels any outstanding session. The outcome is recorded and returned.
    pub fn prepare(&self) -> GateOutcome {
        let span = info_span!("usecase.prepare");
        let _enter = span.enter();

        let mut state = self.state();
        state.cancel_active();
        state.key = None;
        state.crypto = None;
        state.provisioning_failure = None;

        let outcome = match self.gate.execute() {
            Err(failure) => {
                debug!(%failure, "biometric precondition failed");
                GateOutcome::from(failure)
            }
            Ok(()) => match self.provision.execute() {
                Ok(provisioned) => {
                    state.key = Some(provisioned.key);
                    state.crypto = Some(provisioned.crypto);
                    GateOutcome::Ready
                }
                Err(err) => {
                    warn!(error = %err, cause = %err.cause(), "cipher provisioning failed");
                    state.provisioning_failure = Some(err);
                    GateOutcome::ProvisioningError
                }
            },
        };

        info!(%outcome, "biometric gate evaluated");
        state.outcome = Some(outcome);
        outcome
    }

    /// Outcome of the last [`prepare`](Self::prepare), if any.
    pub fn gate_outcome(&self) -> Option<GateOutcome> {
        self.state().outcome
    }

    /// Cause of the last provisioning failure, kept for diagnostics.
    pub fn provisioning_failure(&self) -> Option<ProvisioningError> {
        self.state().provisioning_failure.clone()
    }

    pub fn key_policy(&self) -> KeyPolicy {
        self.provision.policy()
    }

    /// Start a new session, cancelling the outstanding one first.
    ///
    /// Only valid once [`prepare`](Self::prepare) returned
    /// [`GateOutcome::Ready`]. Must be called from within a Tokio runtime.
    pub fn start_authentication(&self) -> Result<AuthenticationSession, StartError> {
        let mut state = self.state();

        match state.outcome {
            None => return Err(StartError::NotPrepared),
            Some(GateOutcome::Ready) => {}
            Some(outcome) => return Err(StartError::NotReady(outcome)),
        }

        state.cancel_active();

        let crypto = match state.crypto.take() {
            Some(crypto) => crypto,
            None => {
                let key = state.key.as_ref().ok_or(StartError::NotPrepared)?;
                debug!(key = key.name(), "initializing fresh cipher for new attempt");
                self.provision.reinit(key)?
            }
        };

        let session = AuthenticationSession::start(self.sensor.clone(), crypto);
        debug!(session = session.id(), "authentication session started");
        state.active = Some(session.handle());
        Ok(session)
    }

    /// Cancel the outstanding session, if any. Idempotent.
    pub fn cancel(&self) {
        self.state().cancel_active();
    }

    pub fn has_active_session(&self) -> bool {
        self.state()
            .active
            .as_ref()
            .is_some_and(SessionHandle::is_active)
    }
}
