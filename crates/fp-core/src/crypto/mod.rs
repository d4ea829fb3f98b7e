//! Key and cipher domain models.
//!
//! This module describes keys and ciphers. It does NOT implement crypto
//! algorithms or key storage; platform adapters do.

mod cipher;
mod key_spec;

pub use cipher::{Cipher, CipherError, CryptoObject, SealedData};
pub use key_spec::{BlockMode, KeyAlgorithm, KeyHandle, KeyPurpose, KeySpec, DEFAULT_KEY_NAME};
