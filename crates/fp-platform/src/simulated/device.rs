use fp_core::{config::DeviceProfile, ports::BiometricCapabilityPort, MIN_BIOMETRIC_API_LEVEL};

/// Capability profile of a simulated device.
///
/// 模拟设备的能力配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedDevice {
    pub api_level: u32,
    pub hardware_detected: bool,
    pub permission_granted: bool,
    pub enrolled: bool,
    pub keyguard_secure: bool,
}

impl SimulatedDevice {
    /// Device on which every gate check passes.
    pub fn capable() -> Self {
        Self {
            api_level: MIN_BIOMETRIC_API_LEVEL,
            hardware_detected: true,
            permission_granted: true,
            enrolled: true,
            keyguard_secure: true,
        }
    }

    pub fn from_profile(profile: &DeviceProfile) -> Self {
        Self {
            api_level: profile.api_level,
            hardware_detected: profile.sensor,
            permission_granted: profile.permission,
            enrolled: profile.enrolled,
            keyguard_secure: profile.lock_screen,
        }
    }

    pub fn with_api_level(mut self, api_level: u32) -> Self {
        self.api_level = api_level;
        self
    }

    pub fn without_sensor(mut self) -> Self {
        self.hardware_detected = false;
        self
    }

    pub fn without_permission(mut self) -> Self {
        self.permission_granted = false;
        self
    }

    pub fn without_enrollment(mut self) -> Self {
        self.enrolled = false;
        self
    }

    pub fn without_lock_screen(mut self) -> Self {
        self.keyguard_secure = false;
        self
    }
}

impl BiometricCapabilityPort for SimulatedDevice {
    fn api_level(&self) -> u32 {
        self.api_level
    }

    fn is_hardware_detected(&self) -> bool {
        self.hardware_detected
    }

    fn has_permission(&self) -> bool {
        self.permission_granted
    }

    fn has_enrolled_fingerprints(&self) -> bool {
        self.enrolled
    }

    fn is_keyguard_secure(&self) -> bool {
        self.keyguard_secure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_profile_copies_every_flag() {
        let profile = DeviceProfile {
            api_level: 28,
            sensor: true,
            permission: false,
            enrolled: true,
            lock_screen: false,
            key_store: "memory".into(),
        };

        let device = SimulatedDevice::from_profile(&profile);

        assert_eq!(device.api_level(), 28);
        assert!(device.is_hardware_detected());
        assert!(!device.has_permission());
        assert!(device.has_enrolled_fingerprints());
        assert!(!device.is_keyguard_secure());
    }

    #[test]
    fn builders_clear_single_capability() {
        let device = SimulatedDevice::capable().without_enrollment();
        assert!(device.is_hardware_detected());
        assert!(!device.has_enrolled_fingerprints());
        assert!(device.is_keyguard_secure());
    }
}
