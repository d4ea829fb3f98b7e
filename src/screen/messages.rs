//! Texts shown in the instruction label.

use fp_core::GateOutcome;

pub const TAP_TO_START: &str = "Tap the fingerprint icon to authenticate";
pub const TOUCH_SENSOR: &str = "Touch the fingerprint sensor";
pub const UNSUPPORTED_OS: &str = "OS version should be > 23";
pub const NO_SENSOR: &str = "Your device doesn't support fingerprint authentication";
pub const NO_PERMISSION: &str = "Please enable the fingerprint permission";
pub const NO_ENROLLMENT: &str =
    "No fingerprint configured. Please register at least one fingerprint in your device's Settings";
pub const NO_LOCK_SCREEN: &str = "Please enable lockscreen security in your device's Settings";
pub const PROVISIONING_ERROR: &str = "Something unexpected";
pub const SUCCEEDED: &str = "Authentication succeeded";
pub const FAILED: &str = "Fingerprint not recognized, try again";

pub fn for_gate(outcome: GateOutcome) -> &'static str {
    match outcome {
        GateOutcome::Unsupported => UNSUPPORTED_OS,
        GateOutcome::NoSensor => NO_SENSOR,
        GateOutcome::NoPermission => NO_PERMISSION,
        GateOutcome::NoEnrollment => NO_ENROLLMENT,
        GateOutcome::NoLockScreen => NO_LOCK_SCREEN,
        GateOutcome::ProvisioningError => PROVISIONING_ERROR,
        GateOutcome::Ready => TAP_TO_START,
    }
}

pub fn help(message: &str) -> String {
    format!("Authentication help: {message}")
}

pub fn error(message: &str) -> String {
    format!("Authentication error: {message}")
}
