//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the host platform.
//! The platform (or a simulated device in tests) implements them, so the
//! gate and session logic never touch a sensor manager or key store directly.

pub mod capability;
pub mod key_store;
pub mod screen;
pub mod sensor;

pub use capability::BiometricCapabilityPort;
pub use key_store::{KeyStoreError, KeyStorePort};
pub use screen::ScreenPort;
pub use sensor::FingerprintSensorPort;
