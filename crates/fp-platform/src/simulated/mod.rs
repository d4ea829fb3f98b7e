//! Simulated biometric platform.
//!
//! Stands in for a phone's fingerprint service: a capability profile and a
//! scripted sensor. The demo binary wires these from configuration; tests use
//! them to reach every gate and authentication outcome.

mod device;
mod sensor;

pub use device::SimulatedDevice;
pub use sensor::{ScriptedOutcome, SimulatedSensor};
