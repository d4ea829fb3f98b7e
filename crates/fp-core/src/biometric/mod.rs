//! Biometric domain module.
//!
//! Gate outcomes, authentication outcomes and the cancellation handle shared
//! by use cases and platform adapters.

pub mod auth;
pub mod cancellation;
pub mod codes;
pub mod gate;

pub use auth::{AuthEvent, AuthOutcome, AuthenticationResult, HelpMessage, HelpSink};
pub use cancellation::CancellationHandle;
pub use gate::{GateOutcome, PreconditionFailure, MIN_BIOMETRIC_API_LEVEL};
