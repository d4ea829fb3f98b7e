use fp_core::{
    ports::{KeyStoreError, KeyStorePort},
    Cipher, KeyHandle, KeySpec,
};
use keyring::Entry;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::cipher::{generate_key_material, AesGcmCipher};

const SERVICE_NAME: &str = "FingerprintAuth";
const KEY_PREFIX: &str = "key:v1:";

fn build_username(name: &str) -> String {
    format!("{}{}", KEY_PREFIX, name)
}

#[derive(Serialize, Deserialize)]
struct StoredSecret {
    spec: KeySpec,
    material: Vec<u8>,
}

trait KeyringEntryOps {
    fn get_secret(&self) -> Result<Vec<u8>, keyring::Error>;
    fn set_secret(&self, secret: &[u8]) -> Result<(), keyring::Error>;
    fn delete_credential(&self) -> Result<(), keyring::Error>;
}

trait KeyringBackend {
    type Entry: KeyringEntryOps;
    fn new_entry(&self, service: &str, username: &str) -> Result<Self::Entry, keyring::Error>;
}

struct RealBackend;

struct RealEntry {
    inner: Entry,
}

impl KeyringEntryOps for RealEntry {
    fn get_secret(&self) -> Result<Vec<u8>, keyring::Error> {
        self.inner.get_secret()
    }

    fn set_secret(&self, secret: &[u8]) -> Result<(), keyring::Error> {
        self.inner.set_secret(secret)
    }

    fn delete_credential(&self) -> Result<(), keyring::Error> {
        self.inner.delete_credential()
    }
}

impl KeyringBackend for RealBackend {
    type Entry = RealEntry;

    fn new_entry(&self, service: &str, username: &str) -> Result<Self::Entry, keyring::Error> {
        Entry::new(service, username).map(|inner| RealEntry { inner })
    }
}

fn open_entry<B: KeyringBackend>(backend: &B, name: &str) -> Result<B::Entry, KeyStoreError> {
    backend
        .new_entry(SERVICE_NAME, &build_username(name))
        .map_err(|e| {
            KeyStoreError::Unavailable(format!(
                "failed to access keyring entry: {}, key name may be invalid.",
                e
            ))
        })
}

fn map_read_error(name: &str, err: keyring::Error) -> KeyStoreError {
    match err {
        keyring::Error::NoEntry => KeyStoreError::KeyNotFound(name.to_string()),
        keyring::Error::NoStorageAccess(e) => KeyStoreError::Unavailable(e.to_string()),
        keyring::Error::PlatformFailure(e) => KeyStoreError::Unavailable(e.to_string()),
        other => KeyStoreError::Storage(other.to_string()),
    }
}

fn read_secret<B: KeyringBackend>(backend: &B, name: &str) -> Result<StoredSecret, KeyStoreError> {
    let entry = open_entry(backend, name)?;
    let raw = Zeroizing::new(entry.get_secret().map_err(|e| map_read_error(name, e))?);
    serde_json::from_slice(&raw)
        .map_err(|e| KeyStoreError::InvalidKey(format!("invalid key material in keyring: {e}")))
}

fn contains_with_backend<B: KeyringBackend>(backend: &B, name: &str) -> Result<bool, KeyStoreError> {
    let entry = open_entry(backend, name)?;
    match entry.get_secret() {
        Ok(secret) => {
            drop(Zeroizing::new(secret));
            Ok(true)
        }
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(e) => Err(map_read_error(name, e)),
    }
}

fn generate_with_backend<B: KeyringBackend>(
    backend: &B,
    spec: &KeySpec,
) -> Result<KeyHandle, KeyStoreError> {
    if spec.name.is_empty() {
        return Err(KeyStoreError::InvalidParameters("key name is empty".into()));
    }
    let material = generate_key_material();
    let stored = StoredSecret {
        spec: spec.clone(),
        material: material.to_vec(),
    };
    let encoded = Zeroizing::new(
        serde_json::to_vec(&stored).map_err(|e| KeyStoreError::Storage(e.to_string()))?,
    );
    drop(Zeroizing::new(stored.material));

    let entry = open_entry(backend, &spec.name)?;
    entry
        .set_secret(&encoded)
        .map_err(|e| KeyStoreError::Storage(format!("failed to store key: {}", e)))?;
    info!(key = %spec.name, "key generated in system keyring");
    Ok(KeyHandle::new(spec.clone()))
}

fn load_with_backend<B: KeyringBackend>(backend: &B, name: &str) -> Result<KeyHandle, KeyStoreError> {
    let stored = read_secret(backend, name)?;
    drop(Zeroizing::new(stored.material));
    Ok(KeyHandle::new(stored.spec))
}

fn delete_with_backend<B: KeyringBackend>(backend: &B, name: &str) -> Result<(), KeyStoreError> {
    let entry = open_entry(backend, name)?;
    match entry.delete_credential() {
        Ok(_) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(KeyStoreError::Storage(format!("failed to delete key: {e}"))),
    }
}

fn init_cipher_with_backend<B: KeyringBackend>(
    backend: &B,
    key: &KeyHandle,
) -> Result<Box<dyn Cipher>, KeyStoreError> {
    let stored = read_secret(backend, key.name())?;
    let material = Zeroizing::new(stored.material);
    if &stored.spec != key.spec() {
        debug!(key = %key.name(), "stored spec differs from handle, using stored spec");
    }
    let cipher = AesGcmCipher::new(stored.spec, &material)?;
    Ok(Box::new(cipher))
}

/// Key store backed by the OS credential store (Keychain, Credential
/// Manager, Secret Service).
///
/// 基于系统凭据存储的密钥库。
pub struct SystemKeyStore {}

impl SystemKeyStore {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for SystemKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStorePort for SystemKeyStore {
    fn contains_key(&self, name: &str) -> Result<bool, KeyStoreError> {
        contains_with_backend(&RealBackend, name)
    }

    /// Overwrites an existing entry with the same name.
    fn generate_key(&self, spec: &KeySpec) -> Result<KeyHandle, KeyStoreError> {
        generate_with_backend(&RealBackend, spec)
    }

    fn load_key(&self, name: &str) -> Result<KeyHandle, KeyStoreError> {
        load_with_backend(&RealBackend, name)
    }

    fn delete_key(&self, name: &str) -> Result<(), KeyStoreError> {
        delete_with_backend(&RealBackend, name)
    }

    fn init_cipher(&self, key: &KeyHandle) -> Result<Box<dyn Cipher>, KeyStoreError> {
        init_cipher_with_backend(&RealBackend, key)
    }
}
