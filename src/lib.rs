//! FingerprintAuth demo application.
//!
//! Wires the simulated platform adapters to the authenticator facade and
//! drives it from a terminal screen.

pub mod adapters;
pub mod bootstrap;
pub mod screen;

pub use screen::FingerprintScreen;
