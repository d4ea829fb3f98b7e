use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use fp_core::{
    ports::FingerprintSensorPort, AuthEvent, AuthOutcome, CancellationHandle, CryptoObject,
    HelpSink,
};
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, Instrument};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

fn outcome_label(outcome: &AuthOutcome) -> &'static str {
    match outcome {
        AuthOutcome::Succeeded(_) => "succeeded",
        AuthOutcome::Failed => "failed",
        AuthOutcome::Error { .. } => "error",
    }
}

/// Shared view of a running session, kept by whoever may need to cancel it.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: u64,
    cancel: CancellationHandle,
    finished: Arc<AtomicBool>,
}

impl SessionHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Idempotent; a no-op once the session has finished.
    pub fn cancel(&self) {
        if !self.is_finished() && !self.cancel.is_cancelled() {
            debug!(session = self.id, "cancelling authentication session");
        }
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Neither finished nor cancelled.
    pub fn is_active(&self) -> bool {
        !self.is_finished() && !self.cancel.is_cancelled()
    }
}

/// One single-shot authentication request.
///
/// 单次认证会话：零个或多个提示事件，然后恰好一个终态结果。
///
/// The sensor runs on a spawned task. Events reach the consumer in order
/// through [`AuthenticationSession::next_event`]. Once cancelled before the
/// terminal outcome fires, the session yields nothing more. Dropping the
/// session cancels it.
pub struct AuthenticationSession {
    handle: SessionHandle,
    events: mpsc::UnboundedReceiver<AuthEvent>,
    done: bool,
}

impl AuthenticationSession {
    /// Submit `crypto` to the sensor and start listening.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(sensor: Arc<dyn FingerprintSensorPort>, crypto: CryptoObject) -> Self {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        let handle = SessionHandle {
            id,
            cancel: CancellationHandle::new(),
            finished: Arc::new(AtomicBool::new(false)),
        };
        let (tx, rx) = mpsc::unbounded_channel();

        let help = HelpSink::new(tx.clone());
        let cancel = handle.cancel.clone();
        let finished = handle.finished.clone();
        let span = info_span!("usecase.authentication_session", session = id);

        tokio::spawn(
            async move {
                debug!("authentication request submitted");
                let outcome = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        debug!("session cancelled before a terminal outcome");
                        return;
                    }
                    outcome = sensor.authenticate(crypto, cancel.clone(), help) => outcome,
                };
                if cancel.is_cancelled() {
                    debug!(outcome = outcome_label(&outcome), "dropping outcome of cancelled session");
                    return;
                }
                info!(outcome = outcome_label(&outcome), "authentication finished");
                finished.store(true, Ordering::SeqCst);
                let _ = tx.send(AuthEvent::Finished(outcome));
            }
            .instrument(span),
        );

        Self {
            handle,
            events: rx,
            done: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.handle.id
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn cancel_handle(&self) -> CancellationHandle {
        self.handle.cancel.clone()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.cancel.is_cancelled()
    }

    /// Next event in delivery order: help messages, then the terminal
    /// outcome. Returns `None` after the terminal outcome, or once cancelled
    /// before the terminal outcome fired.
    pub async fn next_event(&mut self) -> Option<AuthEvent> {
        if self.done {
            return None;
        }

        let received = tokio::select! {
            biased;
            _ = self.handle.cancel.cancelled() => None,
            event = self.events.recv() => Some(event),
        };

        // Once the outcome fired, a late cancel is a no-op: keep draining.
        let finished = self.handle.is_finished();
        let event = match received {
            Some(event) if finished || !self.handle.cancel.is_cancelled() => event,
            None if finished => self.events.recv().await,
            _ => {
                self.done = true;
                return None;
            }
        };

        match &event {
            Some(AuthEvent::Help(_)) => {}
            Some(AuthEvent::Finished(_)) | None => self.done = true,
        }
        event
    }

    /// Skip help messages and wait for the terminal outcome.
    ///
    /// Returns `None` if the session was cancelled.
    pub async fn outcome(mut self) -> Option<AuthOutcome> {
        loop {
            match self.next_event().await? {
                AuthEvent::Help(help) => {
                    debug!(code = help.code, "skipping help message");
                }
                AuthEvent::Finished(outcome) => return Some(outcome),
            }
        }
    }
}

impl Drop for AuthenticationSession {
    fn drop(&mut self) {
        self.handle.cancel.cancel();
    }
}
