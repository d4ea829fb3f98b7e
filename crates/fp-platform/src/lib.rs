//! # fp-platform
//!
//! Platform-specific implementations for FingerprintAuth.
//!
//! This crate contains the adapters behind the `fp-core` ports: key stores,
//! the software cipher they hand out, and a simulated device and sensor used
//! by the demo binary and by tests.

pub mod app_dirs;
pub mod cipher;
pub mod key_store;
pub mod simulated;

pub use cipher::AesGcmCipher;
pub use key_store::{InMemoryKeyStore, SystemKeyStore};
pub use simulated::{ScriptedOutcome, SimulatedDevice, SimulatedSensor};
