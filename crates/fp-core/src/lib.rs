//! # fp-core
//!
//! Core domain models and ports for FingerprintAuth.
//!
//! This crate contains the biometric gate and session vocabulary plus the
//! port traits a host platform implements. It has no platform dependencies.

pub mod biometric;
pub mod config;
pub mod crypto;
pub mod ports;

// Re-export commonly used types at the crate root
pub use biometric::{
    AuthEvent, AuthOutcome, AuthenticationResult, CancellationHandle, GateOutcome, HelpMessage,
    HelpSink, PreconditionFailure, MIN_BIOMETRIC_API_LEVEL,
};
pub use config::AppConfig;
pub use crypto::{Cipher, CipherError, CryptoObject, KeyHandle, KeySpec, SealedData};
