use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical key name used when the configuration does not name one.
pub const DEFAULT_KEY_NAME: &str = "YOUR_APP_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    Aes256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockMode {
    /// Authenticated mode; no padding needed.
    Gcm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPurpose {
    Encrypt,
    Decrypt,
}

/// Parameters a key is generated with.
///
/// 密钥生成参数。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    pub name: String,
    pub algorithm: KeyAlgorithm,
    pub block_mode: BlockMode,
    pub purposes: Vec<KeyPurpose>,
    /// Every use of the key needs a fresh biometric confirmation.
    pub user_authentication_required: bool,
}

impl KeySpec {
    /// Symmetric encrypt/decrypt key that can only be used after a fingerprint match.
    pub fn biometric_bound(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            algorithm: KeyAlgorithm::Aes256,
            block_mode: BlockMode::Gcm,
            purposes: vec![KeyPurpose::Encrypt, KeyPurpose::Decrypt],
            user_authentication_required: true,
        }
    }

    pub fn allows(&self, purpose: KeyPurpose) -> bool {
        self.purposes.contains(&purpose)
    }

    /// Cipher transformation string, e.g. `AES-256/GCM/NoPadding`.
    pub fn transformation(&self) -> String {
        format!("{}/{}/NoPadding", self.algorithm, self.block_mode)
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Aes256 => write!(f, "AES-256"),
        }
    }
}

impl fmt::Display for BlockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockMode::Gcm => write!(f, "GCM"),
        }
    }
}

/// Opaque reference to a key held by a key store.
///
/// Key material never crosses the port; only the name and spec do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHandle {
    spec: KeySpec,
}

impl KeyHandle {
    pub fn new(spec: KeySpec) -> Self {
        Self { spec }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn spec(&self) -> &KeySpec {
        &self.spec
    }
}
