use std::fmt;

use thiserror::Error;

use super::KeyPurpose;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("user authentication required before the key can be used")]
    UserNotAuthenticated,

    #[error("key is not allowed for {0:?}")]
    PurposeNotAllowed(KeyPurpose),

    #[error("encryption failed: {0}")]
    Encrypt(String),

    #[error("decryption failed: {0}")]
    Decrypt(String),
}

/// Output of [`Cipher::encrypt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedData {
    pub nonce: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

/// A cipher bound to one key in a key store.
///
/// 绑定到密钥库中某个密钥的密码器。
///
/// When the key requires user authentication the cipher refuses to operate
/// until [`Cipher::authorize`] is called, and each authorization covers a
/// single encrypt or decrypt call.
pub trait Cipher: Send + fmt::Debug {
    fn key_name(&self) -> &str;

    fn transformation(&self) -> String;

    fn requires_authorization(&self) -> bool;

    fn is_authorized(&self) -> bool;

    /// Grant one use. Called by the sensor after a successful match.
    fn authorize(&mut self);

    fn encrypt(&mut self, plaintext: &[u8]) -> Result<SealedData, CipherError>;

    fn decrypt(&mut self, sealed: &SealedData) -> Result<Vec<u8>, CipherError>;
}

/// Wrapper handed to the sensor together with an authentication request.
#[derive(Debug)]
pub struct CryptoObject {
    cipher: Box<dyn Cipher>,
}

impl CryptoObject {
    pub fn new(cipher: Box<dyn Cipher>) -> Self {
        Self { cipher }
    }

    pub fn cipher(&self) -> &dyn Cipher {
        self.cipher.as_ref()
    }

    pub fn cipher_mut(&mut self) -> &mut dyn Cipher {
        self.cipher.as_mut()
    }

    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<SealedData, CipherError> {
        self.cipher.encrypt(plaintext)
    }

    pub fn decrypt(&mut self, sealed: &SealedData) -> Result<Vec<u8>, CipherError> {
        self.cipher.decrypt(sealed)
    }
}
