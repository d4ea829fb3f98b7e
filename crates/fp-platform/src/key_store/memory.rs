use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use fp_core::{
    ports::{KeyStoreError, KeyStorePort},
    Cipher, KeyHandle, KeySpec,
};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cipher::{generate_key_material, AesGcmCipher};

struct StoredKey {
    spec: KeySpec,
    material: Zeroizing<Vec<u8>>,
    invalidated: bool,
}

/// Process-local key store.
///
/// 进程内密钥库（用于模拟设备与测试）。
///
/// Keys live only as long as the store. A store created with
/// [`InMemoryKeyStore::failing`] rejects every call, which stands in for a
/// device whose key store cannot be loaded.
pub struct InMemoryKeyStore {
    entries: Mutex<HashMap<String, StoredKey>>,
    failure: Option<KeyStoreError>,
    generated: AtomicUsize,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            failure: None,
            generated: AtomicUsize::new(0),
        }
    }

    /// Store whose every operation fails with `err`.
    pub fn failing(err: KeyStoreError) -> Self {
        Self {
            failure: Some(err),
            ..Self::new()
        }
    }

    /// Number of keys generated so far, overwrites included.
    pub fn generated_count(&self) -> usize {
        self.generated.load(Ordering::SeqCst)
    }

    /// Mark a key permanently invalidated, as the platform does when a new
    /// fingerprint is enrolled. Returns `false` if the key does not exist.
    pub fn invalidate(&self, name: &str) -> bool {
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };
        match entries.get_mut(name) {
            Some(entry) => {
                entry.invalidated = true;
                true
            }
            None => false,
        }
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, StoredKey>>, KeyStoreError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.entries
            .lock()
            .map_err(|_| KeyStoreError::Unavailable("key store lock poisoned".into()))
    }
}

impl Default for InMemoryKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStorePort for InMemoryKeyStore {
    fn contains_key(&self, name: &str) -> Result<bool, KeyStoreError> {
        Ok(self.entries()?.contains_key(name))
    }

    fn generate_key(&self, spec: &KeySpec) -> Result<KeyHandle, KeyStoreError> {
        if spec.name.is_empty() {
            return Err(KeyStoreError::InvalidParameters("key name is empty".into()));
        }
        let mut entries = self.entries()?;
        let replaced = entries
            .insert(
                spec.name.clone(),
                StoredKey {
                    spec: spec.clone(),
                    material: generate_key_material(),
                    invalidated: false,
                },
            )
            .is_some();
        self.generated.fetch_add(1, Ordering::SeqCst);
        debug!(key = %spec.name, replaced, "in-memory key generated");
        Ok(KeyHandle::new(spec.clone()))
    }

    fn load_key(&self, name: &str) -> Result<KeyHandle, KeyStoreError> {
        self.entries()?
            .get(name)
            .map(|entry| KeyHandle::new(entry.spec.clone()))
            .ok_or_else(|| KeyStoreError::KeyNotFound(name.to_string()))
    }

    fn delete_key(&self, name: &str) -> Result<(), KeyStoreError> {
        self.entries()?.remove(name);
        Ok(())
    }

    fn init_cipher(&self, key: &KeyHandle) -> Result<Box<dyn Cipher>, KeyStoreError> {
        let entries = self.entries()?;
        let entry = entries
            .get(key.name())
            .ok_or_else(|| KeyStoreError::KeyNotFound(key.name().to_string()))?;
        if entry.invalidated {
            return Err(KeyStoreError::KeyInvalidated(key.name().to_string()));
        }
        let cipher = AesGcmCipher::new(entry.spec.clone(), &entry.material)?;
        Ok(Box::new(cipher))
    }
}
