use std::sync::Arc;

use fp_core::{ports::BiometricCapabilityPort, PreconditionFailure, MIN_BIOMETRIC_API_LEVEL};
use tracing::{debug, info_span};

/// Use case evaluating the biometric preconditions.
///
/// Checks run in a fixed order (OS version, sensor, permission, enrollment,
/// lock screen) and stop at the first failure; later capabilities are not
/// queried.
pub struct CheckBiometricGate {
    capabilities: Arc<dyn BiometricCapabilityPort>,
}

impl CheckBiometricGate {
    pub fn new(capabilities: Arc<dyn BiometricCapabilityPort>) -> Self {
        Self { capabilities }
    }

    pub fn execute(&self) -> Result<(), PreconditionFailure> {
        let span = info_span!("usecase.check_biometric_gate");
        let _enter = span.enter();

        let api_level = self.capabilities.api_level();
        if api_level < MIN_BIOMETRIC_API_LEVEL {
            debug!(
                api_level,
                required = MIN_BIOMETRIC_API_LEVEL,
                "biometric APIs unavailable on this platform version"
            );
            return Err(PreconditionFailure::UnsupportedOs {
                actual: api_level,
                required: MIN_BIOMETRIC_API_LEVEL,
            });
        }

        if !self.capabilities.is_hardware_detected() {
            debug!("no fingerprint hardware");
            return Err(PreconditionFailure::NoSensor);
        }

        if !self.capabilities.has_permission() {
            debug!("no fingerprint permission");
            return Err(PreconditionFailure::NoPermission);
        }

        if !self.capabilities.has_enrolled_fingerprints() {
            debug!("no fingerprint configured");
            return Err(PreconditionFailure::NoEnrollment);
        }

        if !self.capabilities.is_keyguard_secure() {
            debug!("lock screen not secured");
            return Err(PreconditionFailure::NoLockScreen);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;

    mockall::mock! {
        pub Capabilities {}

        impl BiometricCapabilityPort for Capabilities {
            fn api_level(&self) -> u32;
            fn is_hardware_detected(&self) -> bool;
            fn has_permission(&self) -> bool;
            fn has_enrolled_fingerprints(&self) -> bool;
            fn is_keyguard_secure(&self) -> bool;
        }
    }

    fn gate(mock: MockCapabilities) -> CheckBiometricGate {
        CheckBiometricGate::new(Arc::new(mock))
    }

    #[test]
    fn unsupported_os_stops_before_any_other_query() {
        let mut mock = MockCapabilities::new();
        mock.expect_api_level().times(1).return_const(22u32);
        mock.expect_is_hardware_detected().times(0);
        mock.expect_has_permission().times(0);
        mock.expect_has_enrolled_fingerprints().times(0);
        mock.expect_is_keyguard_secure().times(0);

        let result = gate(mock).execute();

        assert_eq!(
            result,
            Err(PreconditionFailure::UnsupportedOs {
                actual: 22,
                required: MIN_BIOMETRIC_API_LEVEL
            })
        );
    }

    #[test]
    fn no_sensor_wins_even_when_everything_else_fails() {
        let mut mock = MockCapabilities::new();
        mock.expect_api_level().return_const(23u32);
        mock.expect_is_hardware_detected().times(1).return_const(false);
        mock.expect_has_permission().times(0);
        mock.expect_has_enrolled_fingerprints().times(0);
        mock.expect_is_keyguard_secure().times(0);

        assert_eq!(gate(mock).execute(), Err(PreconditionFailure::NoSensor));
    }

    #[test]
    fn checks_run_in_fixed_order_and_stop_at_enrollment() {
        let mut seq = Sequence::new();
        let mut mock = MockCapabilities::new();
        mock.expect_api_level()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(30u32);
        mock.expect_is_hardware_detected()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(true);
        mock.expect_has_permission()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(true);
        mock.expect_has_enrolled_fingerprints()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(false);
        // lock screen would fail too, but must never be asked
        mock.expect_is_keyguard_secure().times(0).return_const(false);

        assert_eq!(gate(mock).execute(), Err(PreconditionFailure::NoEnrollment));
    }

    #[test]
    fn missing_permission_is_reported() {
        let mut mock = MockCapabilities::new();
        mock.expect_api_level().return_const(23u32);
        mock.expect_is_hardware_detected().return_const(true);
        mock.expect_has_permission().return_const(false);
        mock.expect_has_enrolled_fingerprints().times(0);
        mock.expect_is_keyguard_secure().times(0);

        assert_eq!(gate(mock).execute(), Err(PreconditionFailure::NoPermission));
    }

    #[test]
    fn insecure_lock_screen_is_last_check() {
        let mut mock = MockCapabilities::new();
        mock.expect_api_level().return_const(23u32);
        mock.expect_is_hardware_detected().return_const(true);
        mock.expect_has_permission().return_const(true);
        mock.expect_has_enrolled_fingerprints().return_const(true);
        mock.expect_is_keyguard_secure().times(1).return_const(false);

        assert_eq!(gate(mock).execute(), Err(PreconditionFailure::NoLockScreen));
    }

    #[test]
    fn all_checks_passing_is_ok() {
        let mut mock = MockCapabilities::new();
        mock.expect_api_level().return_const(23u32);
        mock.expect_is_hardware_detected().return_const(true);
        mock.expect_has_permission().return_const(true);
        mock.expect_has_enrolled_fingerprints().return_const(true);
        mock.expect_is_keyguard_secure().return_const(true);

        assert_eq!(gate(mock).execute(), Ok(()));
    }
}
