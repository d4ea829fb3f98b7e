use async_trait::async_trait;

use crate::biometric::{AuthOutcome, CancellationHandle, HelpSink};
use crate::crypto::CryptoObject;

/// Platform fingerprint sensor.
///
/// 平台指纹传感器端口。
#[async_trait]
pub trait FingerprintSensorPort: Send + Sync {
    /// Listen for one fingerprint and resolve to a terminal outcome.
    ///
    /// Semantics:
    /// - Help messages may be pushed to `help` any number of times first
    /// - On a match the sensor authorizes the crypto object's cipher and
    ///   returns it inside [`AuthOutcome::Succeeded`]
    /// - The sensor should stop listening once `cancel` fires; whatever it
    ///   returns afterwards is discarded by the session
    async fn authenticate(
        &self,
        crypto: CryptoObject,
        cancel: CancellationHandle,
        help: HelpSink,
    ) -> AuthOutcome;
}
