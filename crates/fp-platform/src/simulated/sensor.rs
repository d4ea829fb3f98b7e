use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use fp_core::{
    biometric::codes,
    config::SensorScript,
    ports::FingerprintSensorPort,
    AuthOutcome, AuthenticationResult, CancellationHandle, CryptoObject, HelpMessage, HelpSink,
};
use tracing::{debug, warn};

const CANCELED_MESSAGE: &str = "Fingerprint operation canceled.";

/// What the simulated finger does once the help script has played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedOutcome {
    /// Recognized finger; the cipher gets authorized.
    Match,
    /// Finger read but not recognized.
    NoMatch,
    Error { code: i32, message: String },
    /// Nobody touches the sensor; only cancellation ends the request.
    NoTouch,
}

/// Scripted fingerprint sensor.
///
/// 脚本化的模拟指纹传感器。
///
/// Each request waits `step_delay` before every help message and before the
/// terminal outcome, and stops early when cancelled.
#[derive(Debug)]
pub struct SimulatedSensor {
    help: Vec<HelpMessage>,
    outcome: ScriptedOutcome,
    step_delay: Duration,
    requests: AtomicUsize,
}

impl SimulatedSensor {
    pub fn new(outcome: ScriptedOutcome) -> Self {
        Self {
            help: Vec::new(),
            outcome,
            step_delay: Duration::ZERO,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn with_help(mut self, help: Vec<HelpMessage>) -> Self {
        self.help = help;
        self
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Build from the `[sensor]` configuration section.
    pub fn from_script(script: &SensorScript) -> Self {
        let outcome = match script.outcome.as_str() {
            "success" => ScriptedOutcome::Match,
            "failure" => ScriptedOutcome::NoMatch,
            "error" => ScriptedOutcome::Error {
                code: script.error_code,
                message: script.error_message.clone(),
            },
            "none" => ScriptedOutcome::NoTouch,
            other => {
                warn!(outcome = %other, "unknown scripted sensor outcome, using hardware error");
                ScriptedOutcome::Error {
                    code: codes::error::HW_UNAVAILABLE,
                    message: "Fingerprint hardware not available.".to_string(),
                }
            }
        };
        let help = script
            .help
            .iter()
            .map(|message| HelpMessage::new(codes::help::IMAGER_DIRTY, message.clone()))
            .collect();

        Self::new(outcome)
            .with_help(help)
            .with_step_delay(Duration::from_millis(script.step_delay_ms))
    }

    /// Number of authentication requests received.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Returns `false` if cancelled while waiting.
    async fn step(&self, cancel: &CancellationHandle) -> bool {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(self.step_delay) => true,
        }
    }
}

#[async_trait]
impl FingerprintSensorPort for SimulatedSensor {
    async fn authenticate(
        &self,
        mut crypto: CryptoObject,
        cancel: CancellationHandle,
        help: HelpSink,
    ) -> AuthOutcome {
        let request = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(request, key = %crypto.cipher().key_name(), "simulated sensor listening");

        for message in &self.help {
            if !self.step(&cancel).await {
                return AuthOutcome::error(codes::error::CANCELED, CANCELED_MESSAGE);
            }
            if !help.send(message.clone()) {
                debug!(request, "help listener gone");
            }
        }

        if !self.step(&cancel).await {
            return AuthOutcome::error(codes::error::CANCELED, CANCELED_MESSAGE);
        }

        match &self.outcome {
            ScriptedOutcome::Match => {
                crypto.cipher_mut().authorize();
                AuthOutcome::Succeeded(AuthenticationResult::new(crypto))
            }
            ScriptedOutcome::NoMatch => AuthOutcome::Failed,
            ScriptedOutcome::Error { code, message } => AuthOutcome::error(*code, message.clone()),
            ScriptedOutcome::NoTouch => {
                cancel.cancelled().await;
                AuthOutcome::error(codes::error::CANCELED, CANCELED_MESSAGE)
            }
        }
    }
}
