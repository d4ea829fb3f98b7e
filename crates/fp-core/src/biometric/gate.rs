use std::fmt;

use thiserror::Error;

/// Lowest platform API level that exposes the fingerprint APIs.
///
/// 支持指纹 API 的最低平台 API 级别。
pub const MIN_BIOMETRIC_API_LEVEL: u32 = 23;

/// Result of the biometric gate plus key/cipher provisioning.
///
/// 生物识别门禁（含密钥/密码器准备）的结果。
///
/// Exactly one value is produced per preparation. Only [`GateOutcome::Ready`]
/// allows an authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateOutcome {
    /// Platform API level is too old for biometric APIs.
    Unsupported,
    /// No fingerprint sensor present.
    NoSensor,
    /// Fingerprint permission not granted to the application.
    NoPermission,
    /// No fingerprint enrolled on the device.
    NoEnrollment,
    /// Device has no secure lock screen.
    NoLockScreen,
    /// Key or cipher could not be provisioned. The cause is kept separately
    /// for diagnostics.
    ProvisioningError,
    /// All checks passed and a cipher is ready.
    Ready,
}

impl GateOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, GateOutcome::Ready)
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateOutcome::Unsupported => "unsupported",
            GateOutcome::NoSensor => "no_sensor",
            GateOutcome::NoPermission => "no_permission",
            GateOutcome::NoEnrollment => "no_enrollment",
            GateOutcome::NoLockScreen => "no_lock_screen",
            GateOutcome::ProvisioningError => "provisioning_error",
            GateOutcome::Ready => "ready",
        };
        write!(f, "{}", s)
    }
}

/// First precondition that failed during the gate check.
///
/// 门禁检查中第一个失败的前置条件。
///
/// Variants are declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionFailure {
    #[error("platform API level {actual} is below required {required}")]
    UnsupportedOs { actual: u32, required: u32 },

    #[error("no fingerprint sensor detected")]
    NoSensor,

    #[error("fingerprint permission not granted")]
    NoPermission,

    #[error("no fingerprint enrolled")]
    NoEnrollment,

    #[error("lock screen is not secured")]
    NoLockScreen,
}

impl From<PreconditionFailure> for GateOutcome {
    fn from(failure: PreconditionFailure) -> Self {
        match failure {
            PreconditionFailure::UnsupportedOs { .. } => GateOutcome::Unsupported,
            PreconditionFailure::NoSensor => GateOutcome::NoSensor,
            PreconditionFailure::NoPermission => GateOutcome::NoPermission,
            PreconditionFailure::NoEnrollment => GateOutcome::NoEnrollment,
            PreconditionFailure::NoLockScreen => GateOutcome::NoLockScreen,
        }
    }
}
