//! Business logic use cases
//!
//! prepare:  CheckBiometricGate → ProvisionCipher → GateOutcome
//! tap:      AuthenticationSession (help* → terminal outcome)

pub mod authentication_session;
pub mod check_gate;
pub mod provision_cipher;

pub use authentication_session::{AuthenticationSession, SessionHandle};
pub use check_gate::CheckBiometricGate;
pub use provision_cipher::{KeyPolicy, ProvisionCipher, ProvisionedCipher, ProvisioningError};
