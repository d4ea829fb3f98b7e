//! FingerprintAuth application layer
//!
//! Use cases for the biometric gate, key/cipher provisioning and
//! authentication sessions, plus the facade a screen drives.

pub mod authenticator;
pub mod usecases;

pub use authenticator::{FingerprintAuthenticator, FingerprintAuthenticatorDeps, StartError};
pub use usecases::{
    AuthenticationSession, CheckBiometricGate, KeyPolicy, ProvisionCipher, ProvisionedCipher,
    ProvisioningError, SessionHandle,
};
