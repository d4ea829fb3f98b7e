//! Software AES-256-GCM cipher handed out by the key store adapters.

use std::fmt;

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use fp_core::{
    crypto::KeyPurpose, ports::KeyStoreError, Cipher, CipherError, KeySpec, SealedData,
};
use zeroize::Zeroizing;

pub(crate) const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Generate fresh AES-256 key material.
pub(crate) fn generate_key_material() -> Zeroizing<Vec<u8>> {
    let key = Aes256Gcm::generate_key(OsRng);
    Zeroizing::new(key.to_vec())
}

pub struct AesGcmCipher {
    spec: KeySpec,
    aead: Aes256Gcm,
    authorized: bool,
}

impl AesGcmCipher {
    pub fn new(spec: KeySpec, key_material: &[u8]) -> Result<Self, KeyStoreError> {
        if key_material.len() != KEY_LEN {
            return Err(KeyStoreError::InvalidKey(format!(
                "expected {KEY_LEN} key bytes, found {}",
                key_material.len()
            )));
        }
        let aead = Aes256Gcm::new_from_slice(key_material)
            .map_err(|e| KeyStoreError::InvalidKey(e.to_string()))?;
        Ok(Self {
            spec,
            aead,
            authorized: false,
        })
    }

    fn check_purpose(&self, purpose: KeyPurpose) -> Result<(), CipherError> {
        if self.spec.allows(purpose) {
            Ok(())
        } else {
            Err(CipherError::PurposeNotAllowed(purpose))
        }
    }

    /// One authorization covers one operation.
    fn consume_authorization(&mut self) -> Result<(), CipherError> {
        if !self.spec.user_authentication_required {
            return Ok(());
        }
        if !self.authorized {
            return Err(CipherError::UserNotAuthenticated);
        }
        self.authorized = false;
        Ok(())
    }
}

impl fmt::Debug for AesGcmCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmCipher")
            .field("key", &self.spec.name)
            .field("authorized", &self.authorized)
            .finish_non_exhaustive()
    }
}

impl Cipher for AesGcmCipher {
    fn key_name(&self) -> &str {
        &self.spec.name
    }

    fn transformation(&self) -> String {
        self.spec.transformation()
    }

    fn requires_authorization(&self) -> bool {
        self.spec.user_authentication_required
    }

    fn is_authorized(&self) -> bool {
        self.authorized
    }

    fn authorize(&mut self) {
        self.authorized = true;
    }

    fn encrypt(&mut self, plaintext: &[u8]) -> Result<SealedData, CipherError> {
        self.check_purpose(KeyPurpose::Encrypt)?;
        self.consume_authorization()?;

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .aead
            .encrypt(&nonce, plaintext)
            .map_err(|e| CipherError::Encrypt(e.to_string()))?;
        Ok(SealedData {
            nonce: nonce.to_vec(),
            ciphertext,
        })
    }

    fn decrypt(&mut self, sealed: &SealedData) -> Result<Vec<u8>, CipherError> {
        self.check_purpose(KeyPurpose::Decrypt)?;
        if sealed.nonce.len() != NONCE_LEN {
            return Err(CipherError::Decrypt(format!(
                "nonce must be {NONCE_LEN} bytes, found {}",
                sealed.nonce.len()
            )));
        }
        self.consume_authorization()?;

        self.aead
            .decrypt(Nonce::from_slice(&sealed.nonce), sealed.ciphertext.as_slice())
            .map_err(|e| CipherError::Decrypt(e.to_string()))
    }
}
