//! Platform fingerprint codes.
//!
//! Values follow the host fingerprint service conventions. Error codes are
//! passed through opaquely; the constants exist so adapters and tests agree
//! on the common ones.

/// Terminal error codes reported with [`crate::AuthOutcome::Error`].
pub mod error {
    pub const HW_UNAVAILABLE: i32 = 1;
    pub const UNABLE_TO_PROCESS: i32 = 2;
    pub const TIMEOUT: i32 = 3;
    pub const NO_SPACE: i32 = 4;
    pub const CANCELED: i32 = 5;
    pub const LOCKOUT: i32 = 7;
    pub const VENDOR: i32 = 8;
    pub const LOCKOUT_PERMANENT: i32 = 9;
    pub const USER_CANCELED: i32 = 10;
}

/// Advisory codes reported with [`crate::HelpMessage`].
pub mod help {
    pub const PARTIAL: i32 = 1;
    pub const INSUFFICIENT: i32 = 2;
    pub const IMAGER_DIRTY: i32 = 3;
    pub const TOO_SLOW: i32 = 4;
    pub const TOO_FAST: i32 = 5;
}
