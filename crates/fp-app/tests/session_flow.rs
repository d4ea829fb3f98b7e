//! Authentication sessions started through the authenticator facade.

use std::sync::Arc;
use std::time::Duration;

use fp_app::{FingerprintAuthenticator, KeyPolicy};
use fp_core::{
    biometric::codes, ports::FingerprintSensorPort, AuthEvent, AuthOutcome, CipherError,
    GateOutcome, HelpMessage, KeySpec,
};
use fp_platform::{InMemoryKeyStore, ScriptedOutcome, SimulatedDevice, SimulatedSensor};

fn ready_authenticator(sensor: Arc<dyn FingerprintSensorPort>) -> FingerprintAuthenticator {
    let auth = FingerprintAuthenticator::new(
        Arc::new(SimulatedDevice::capable()),
        Arc::new(InMemoryKeyStore::new()),
        sensor,
        KeySpec::biometric_bound("session-flow-key"),
        KeyPolicy::Reuse,
    );
    assert_eq!(auth.prepare(), GateOutcome::Ready);
    auth
}

async fn collect(auth: &FingerprintAuthenticator) -> (Vec<HelpMessage>, Vec<AuthOutcome>) {
    let mut session = auth.start_authentication().expect("session starts");
    let mut help = Vec::new();
    let mut terminal = Vec::new();
    while let Some(event) = session.next_event().await {
        match event {
            AuthEvent::Help(message) => {
                assert!(terminal.is_empty(), "help after terminal outcome");
                help.push(message);
            }
            AuthEvent::Finished(outcome) => terminal.push(outcome),
        }
    }
    (help, terminal)
}

#[tokio::test(start_paused = true)]
async fn success_yields_one_terminal_outcome() {
    let sensor = SimulatedSensor::new(ScriptedOutcome::Match).with_step_delay(Duration::from_millis(200));
    let auth = ready_authenticator(Arc::new(sensor));

    let (help, terminal) = collect(&auth).await;

    assert!(help.is_empty());
    assert_eq!(terminal.len(), 1);
    assert!(terminal[0].is_success());
    assert!(!auth.has_active_session());
}

#[tokio::test(start_paused = true)]
async fn no_match_yields_failed() {
    let sensor = SimulatedSensor::new(ScriptedOutcome::NoMatch).with_step_delay(Duration::from_millis(200));
    let auth = ready_authenticator(Arc::new(sensor));

    let (_, terminal) = collect(&auth).await;

    assert_eq!(terminal.len(), 1);
    assert!(matches!(terminal[0], AuthOutcome::Failed));
}

#[tokio::test(start_paused = true)]
async fn lockout_error_carries_code_and_message() {
    let sensor = SimulatedSensor::new(ScriptedOutcome::Error {
        code: codes::error::LOCKOUT,
        message: "Too many attempts. Try again later.".into(),
    });
    let auth = ready_authenticator(Arc::new(sensor));

    let (_, terminal) = collect(&auth).await;

    assert_eq!(terminal.len(), 1);
    match &terminal[0] {
        AuthOutcome::Error { code, message } => {
            assert_eq!(*code, 7);
            assert_eq!(message, "Too many attempts. Try again later.");
        }
        other => panic!("expected error outcome, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn help_arrives_in_order_before_outcome() {
    let sensor = SimulatedSensor::new(ScriptedOutcome::NoMatch)
        .with_help(vec![
            HelpMessage::new(codes::help::IMAGER_DIRTY, "Sensor dirty"),
            HelpMessage::new(codes::help::TOO_FAST, "Finger moved too fast"),
            HelpMessage::new(codes::help::IMAGER_DIRTY, "Sensor dirty"),
        ])
        .with_step_delay(Duration::from_millis(100));
    let auth = ready_authenticator(Arc::new(sensor));

    let (help, terminal) = collect(&auth).await;

    let codes: Vec<i32> = help.iter().map(|h| h.code).collect();
    assert_eq!(codes, vec![3, 5, 3]);
    assert_eq!(terminal.len(), 1);
    assert!(matches!(terminal[0], AuthOutcome::Failed));
}

#[tokio::test(start_paused = true)]
async fn cancel_before_outcome_suppresses_everything() {
    let sensor = SimulatedSensor::new(ScriptedOutcome::Match)
        .with_help(vec![HelpMessage::new(codes::help::PARTIAL, "Partial")])
        .with_step_delay(Duration::from_secs(5));
    let auth = ready_authenticator(Arc::new(sensor));

    let mut session = auth.start_authentication().expect("session starts");
    auth.cancel();
    auth.cancel();

    tokio::time::advance(Duration::from_secs(30)).await;
    assert!(session.next_event().await.is_none());
    assert!(!auth.has_active_session());
}

#[tokio::test(start_paused = true)]
async fn cancel_after_outcome_is_noop() {
    let auth = ready_authenticator(Arc::new(SimulatedSensor::new(ScriptedOutcome::NoMatch)));

    let mut session = auth.start_authentication().expect("session starts");
    let first = session.next_event().await;
    assert!(matches!(first, Some(AuthEvent::Finished(AuthOutcome::Failed))));

    auth.cancel();
    session.cancel();

    assert!(session.next_event().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn cancel_after_outcome_fired_keeps_outcome() {
    let auth = ready_authenticator(Arc::new(SimulatedSensor::new(ScriptedOutcome::NoMatch)));

    let mut session = auth.start_authentication().expect("session starts");
    let handle = session.handle();
    while !handle.is_finished() {
        tokio::task::yield_now().await;
    }

    auth.cancel();

    assert!(matches!(
        session.next_event().await,
        Some(AuthEvent::Finished(AuthOutcome::Failed))
    ));
    assert!(session.next_event().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn new_session_cancels_outstanding_one() {
    let auth = ready_authenticator(Arc::new(SimulatedSensor::new(ScriptedOutcome::NoTouch)));

    let mut first = auth.start_authentication().expect("first session");
    let second = auth.start_authentication().expect("second session");

    assert!(first.is_cancelled());
    assert!(!second.is_cancelled());
    assert!(first.next_event().await.is_none());
    assert!(auth.has_active_session());

    drop(second);
    assert!(!auth.has_active_session());
}

#[tokio::test(start_paused = true)]
async fn success_unlocks_one_cipher_operation() {
    let auth = ready_authenticator(Arc::new(SimulatedSensor::new(ScriptedOutcome::Match)));

    let session = auth.start_authentication().expect("session starts");
    let outcome = session.outcome().await.expect("terminal outcome");
    let AuthOutcome::Succeeded(result) = outcome else {
        panic!("expected success");
    };
    let mut crypto = result.into_crypto_object();

    let sealed = crypto.encrypt(b"secret").expect("authorized once");
    assert!(matches!(
        crypto.encrypt(b"again"),
        Err(CipherError::UserNotAuthenticated)
    ));
    assert!(matches!(
        crypto.decrypt(&sealed),
        Err(CipherError::UserNotAuthenticated)
    ));
}
