use tokio::sync::mpsc;

use crate::crypto::CryptoObject;

/// Transient guidance from the sensor, e.g. "sensor dirty".
///
/// 传感器的临时提示信息（非致命）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpMessage {
    pub code: i32,
    pub message: String,
}

impl HelpMessage {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Successful match. Carries the crypto object the platform unlocked.
#[derive(Debug)]
pub struct AuthenticationResult {
    crypto: CryptoObject,
}

impl AuthenticationResult {
    pub fn new(crypto: CryptoObject) -> Self {
        Self { crypto }
    }

    pub fn crypto_object(&mut self) -> &mut CryptoObject {
        &mut self.crypto
    }

    pub fn into_crypto_object(self) -> CryptoObject {
        self.crypto
    }
}

/// Terminal outcome of one authentication session.
///
/// 一次认证会话的终态结果。
#[derive(Debug)]
pub enum AuthOutcome {
    Succeeded(AuthenticationResult),
    /// Finger read but not recognized.
    Failed,
    /// Fatal for this session; code and message come straight from the platform.
    Error { code: i32, message: String },
}

impl AuthOutcome {
    pub fn error(code: i32, message: impl Into<String>) -> Self {
        AuthOutcome::Error {
            code,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Succeeded(_))
    }
}

/// Event observed by a session consumer, in delivery order.
#[derive(Debug)]
pub enum AuthEvent {
    Help(HelpMessage),
    Finished(AuthOutcome),
}

/// Write side of the help side-channel handed to the sensor.
///
/// The sensor can only push [`HelpMessage`]s through it; terminal outcomes
/// travel through the sensor's return value.
#[derive(Debug, Clone)]
pub struct HelpSink {
    tx: mpsc::UnboundedSender<AuthEvent>,
}

impl HelpSink {
    pub fn new(tx: mpsc::UnboundedSender<AuthEvent>) -> Self {
        Self { tx }
    }

    /// Returns `false` once nobody is listening anymore.
    pub fn send(&self, help: HelpMessage) -> bool {
        self.tx.send(AuthEvent::Help(help)).is_ok()
    }
}
