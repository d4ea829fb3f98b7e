//! Screen presenter driven end to end over simulated adapters.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use fingerprint_auth_lib::{bootstrap, screen::messages, FingerprintScreen};
use fp_app::{FingerprintAuthenticator, KeyPolicy, StartError};
use fp_core::{
    config::AppConfig,
    ports::{KeyStoreError, ScreenPort},
    GateOutcome, KeySpec,
};
use fp_platform::{InMemoryKeyStore, ScriptedOutcome, SimulatedDevice, SimulatedSensor};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Drawn {
    Label(String),
    Icon(bool),
}

#[derive(Default)]
struct RecordingScreen {
    drawn: Mutex<Vec<Drawn>>,
}

impl RecordingScreen {
    fn labels(&self) -> Vec<String> {
        self.drawn
            .lock()
            .unwrap()
            .iter()
            .filter_map(|d| match d {
                Drawn::Label(text) => Some(text.clone()),
                Drawn::Icon(_) => None,
            })
            .collect()
    }
}

impl ScreenPort for RecordingScreen {
    fn set_instruction(&self, text: &str) {
        self.drawn.lock().unwrap().push(Drawn::Label(text.to_string()));
    }

    fn set_icon_enabled(&self, enabled: bool) {
        self.drawn.lock().unwrap().push(Drawn::Icon(enabled));
    }
}

fn screen_for(config: &AppConfig) -> (FingerprintScreen, Arc<RecordingScreen>) {
    let deps = bootstrap::wire_dependencies(config);
    let authenticator = Arc::new(FingerprintAuthenticator::from_deps(deps));
    let port = Arc::new(RecordingScreen::default());
    (FingerprintScreen::new(authenticator, port.clone()), port)
}

fn ready_config() -> AppConfig {
    let mut config = AppConfig::with_defaults();
    config.sensor.step_delay_ms = 100;
    config
}

#[tokio::test]
async fn precondition_failures_disable_icon_with_message() {
    let cases: [(fn(&mut AppConfig), GateOutcome, &str); 5] = [
        (|c| c.device.api_level = 22, GateOutcome::Unsupported, messages::UNSUPPORTED_OS),
        (|c| c.device.sensor = false, GateOutcome::NoSensor, messages::NO_SENSOR),
        (|c| c.device.permission = false, GateOutcome::NoPermission, messages::NO_PERMISSION),
        (|c| c.device.enrolled = false, GateOutcome::NoEnrollment, messages::NO_ENROLLMENT),
        (|c| c.device.lock_screen = false, GateOutcome::NoLockScreen, messages::NO_LOCK_SCREEN),
    ];

    for (tweak, expected, text) in cases {
        let mut config = ready_config();
        tweak(&mut config);
        let (mut screen, _port) = screen_for(&config);

        assert_eq!(screen.on_create().await.unwrap(), expected);
        assert!(!screen.icon_enabled());
        assert_eq!(screen.label(), text);
        assert!(matches!(
            screen.on_icon_tap(),
            Err(StartError::NotReady(outcome)) if outcome == expected
        ));
    }
}

#[tokio::test]
async fn provisioning_error_disables_icon() {
    let authenticator = Arc::new(FingerprintAuthenticator::new(
        Arc::new(SimulatedDevice::capable()),
        Arc::new(InMemoryKeyStore::failing(KeyStoreError::Unavailable(
            "keystore not loaded".into(),
        ))),
        Arc::new(SimulatedSensor::new(ScriptedOutcome::Match)),
        KeySpec::biometric_bound("screen-flow-key"),
        KeyPolicy::Reuse,
    ));
    let port = Arc::new(RecordingScreen::default());
    let mut screen = FingerprintScreen::new(authenticator, port.clone());

    assert_eq!(screen.on_create().await.unwrap(), GateOutcome::ProvisioningError);

    assert!(!screen.icon_enabled());
    assert_eq!(screen.label(), messages::PROVISIONING_ERROR);
    assert_eq!(screen.label(), "Something unexpected");
    assert_eq!(port.drawn.lock().unwrap().first(), Some(&Drawn::Icon(false)));
    assert!(matches!(
        screen.on_icon_tap(),
        Err(StartError::NotReady(GateOutcome::ProvisioningError))
    ));
}

#[tokio::test]
async fn ready_screen_enables_icon() {
    let (mut screen, port) = screen_for(&ready_config());

    assert_eq!(screen.on_create().await.unwrap(), GateOutcome::Ready);

    assert!(screen.icon_enabled());
    assert_eq!(screen.label(), messages::TAP_TO_START);
    assert_eq!(
        port.drawn.lock().unwrap().first(),
        Some(&Drawn::Icon(true))
    );
}

#[tokio::test(start_paused = true)]
async fn tap_relays_help_then_success() {
    let mut config = ready_config();
    config.sensor.help = vec!["Sensor dirty".into(), "Too fast".into()];
    let (mut screen, port) = screen_for(&config);
    screen.on_create().await.unwrap();

    screen.on_icon_tap().unwrap();
    assert_eq!(screen.label(), messages::TOUCH_SENSOR);
    screen.settle().await;

    assert_eq!(
        port.labels(),
        vec![
            messages::TAP_TO_START.to_string(),
            messages::TOUCH_SENSOR.to_string(),
            messages::help("Sensor dirty"),
            messages::help("Too fast"),
            messages::SUCCEEDED.to_string(),
        ]
    );
    assert!(!screen.has_active_session());
}

#[tokio::test(start_paused = true)]
async fn tap_relays_failure() {
    let mut config = ready_config();
    config.sensor.outcome = "failure".into();
    let (mut screen, _port) = screen_for(&config);
    screen.on_create().await.unwrap();

    screen.on_icon_tap().unwrap();
    screen.settle().await;

    assert_eq!(screen.label(), messages::FAILED);
}

#[tokio::test(start_paused = true)]
async fn tap_relays_platform_error_message() {
    let mut config = ready_config();
    config.sensor.outcome = "error".into();
    config.sensor.error_code = 7;
    config.sensor.error_message = "Too many attempts. Try again later.".into();
    let (mut screen, _port) = screen_for(&config);
    screen.on_create().await.unwrap();

    screen.on_icon_tap().unwrap();
    screen.settle().await;

    assert_eq!(
        screen.label(),
        messages::error("Too many attempts. Try again later.")
    );
}

#[tokio::test(start_paused = true)]
async fn destroy_before_outcome_leaves_label_untouched() {
    let mut config = ready_config();
    config.sensor.step_delay_ms = 5_000;
    let (mut screen, port) = screen_for(&config);
    screen.on_create().await.unwrap();

    screen.on_icon_tap().unwrap();
    screen.on_destroy();
    screen.on_destroy();
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(screen.label(), messages::TOUCH_SENSOR);
    assert_eq!(port.labels().last().map(String::as_str), Some(messages::TOUCH_SENSOR));
    assert!(!screen.has_active_session());
}

#[tokio::test(start_paused = true)]
async fn cancel_command_stops_pending_session() {
    let mut config = ready_config();
    config.sensor.outcome = "none".into();
    let (mut screen, _port) = screen_for(&config);
    screen.on_create().await.unwrap();

    screen.on_icon_tap().unwrap();
    assert!(screen.has_active_session());

    screen.cancel();
    screen.cancel();
    screen.settle().await;

    assert!(!screen.has_active_session());
    assert!(screen.icon_enabled());
    assert_eq!(screen.label(), messages::TOUCH_SENSOR);

    // The screen stays usable after a cancel.
    screen.on_icon_tap().unwrap();
    assert!(screen.has_active_session());
}

#[tokio::test(start_paused = true)]
async fn cancel_after_outcome_still_shows_it() {
    let (mut screen, _port) = screen_for(&ready_config());
    screen.on_create().await.unwrap();

    screen.on_icon_tap().unwrap();
    while screen.has_active_session() {
        tokio::task::yield_now().await;
    }
    screen.cancel();
    screen.settle().await;

    assert_eq!(screen.label(), messages::SUCCEEDED);
}

#[tokio::test(start_paused = true)]
async fn second_tap_replaces_pending_session() {
    let mut config = ready_config();
    config.sensor.outcome = "none".into();
    let (mut screen, _port) = screen_for(&config);
    screen.on_create().await.unwrap();

    screen.on_icon_tap().unwrap();
    screen.on_icon_tap().unwrap();

    assert!(screen.has_active_session());
    screen.on_destroy();
    assert!(!screen.has_active_session());
}
