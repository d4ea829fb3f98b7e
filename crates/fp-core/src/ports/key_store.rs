use thiserror::Error;

use crate::crypto::{Cipher, KeyHandle, KeySpec};

/// Key store errors.
///
/// 密钥库错误类型。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyStoreError {
    /// Key store is unavailable or could not be loaded.
    #[error("key store unavailable: {0}")]
    Unavailable(String),

    /// Requested algorithm, mode or padding is not provided.
    #[error("algorithm unavailable: {0}")]
    AlgorithmUnavailable(String),

    /// Key generation parameters were rejected.
    #[error("invalid key parameters: {0}")]
    InvalidParameters(String),

    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Key exists but can no longer be used, e.g. after a new enrollment.
    #[error("key permanently invalidated: {0}")]
    KeyInvalidated(String),

    /// Key exists but could not initialize a cipher.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("key storage failed: {0}")]
    Storage(String),
}

/// Platform key store holding hardware-backed keys.
///
/// 平台密钥库端口（硬件支持的密钥存储）。
pub trait KeyStorePort: Send + Sync {
    fn contains_key(&self, name: &str) -> Result<bool, KeyStoreError>;

    /// Generate a key for `spec`.
    ///
    /// Requirements:
    /// - Overwrites an existing key with the same name
    /// - Key material stays inside the store
    fn generate_key(&self, spec: &KeySpec) -> Result<KeyHandle, KeyStoreError>;

    fn load_key(&self, name: &str) -> Result<KeyHandle, KeyStoreError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete_key(&self, name: &str) -> Result<(), KeyStoreError>;

    /// Create a cipher bound to `key`.
    fn init_cipher(&self, key: &KeyHandle) -> Result<Box<dyn Cipher>, KeyStoreError>;
}
