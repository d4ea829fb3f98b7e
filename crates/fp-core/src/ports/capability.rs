/// Read-only view of the device's biometric capabilities.
///
/// 设备生物识别能力的只读视图。
///
/// Each query is independent; the gate decides the order and stops at the
/// first failure, so implementations must not assume every method is called.
pub trait BiometricCapabilityPort: Send + Sync {
    /// Platform API level (e.g. 23 for the first release with fingerprint APIs).
    fn api_level(&self) -> u32;

    fn is_hardware_detected(&self) -> bool;

    /// Whether the application holds the fingerprint-use permission.
    fn has_permission(&self) -> bool;

    fn has_enrolled_fingerprints(&self) -> bool;

    /// Whether a PIN, pattern or password protects the lock screen.
    fn is_keyguard_secure(&self) -> bool;
}
