use std::str::FromStr;
use std::sync::Arc;

use fp_core::{
    ports::{KeyStoreError, KeyStorePort},
    CryptoObject, KeyHandle, KeySpec,
};
use tracing::{debug, info, info_span, warn};

/// What to do with an existing key when provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Keep an existing key; generate only when missing or invalidated.
    #[default]
    Reuse,
    /// Overwrite the key on every preparation.
    Regenerate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key policy: {0}")]
pub struct UnknownKeyPolicy(String);

impl FromStr for KeyPolicy {
    type Err = UnknownKeyPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reuse" => Ok(KeyPolicy::Reuse),
            "regenerate" => Ok(KeyPolicy::Regenerate),
            other => Err(UnknownKeyPolicy(other.to_string())),
        }
    }
}

impl KeyPolicy {
    /// Parse the raw configuration value, falling back to [`KeyPolicy::Reuse`].
    pub fn from_config(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|err: UnknownKeyPolicy| {
            if !raw.is_empty() {
                warn!(error = %err, "falling back to key policy `reuse`");
            }
            KeyPolicy::Reuse
        })
    }
}

/// Key/cipher provisioning failure.
///
/// Publicly every variant collapses into `GateOutcome::ProvisioningError`;
/// the step and key store cause are kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisioningError {
    #[error("failed to look up key `{key}`")]
    Lookup {
        key: String,
        #[source]
        source: KeyStoreError,
    },

    #[error("failed to generate key `{key}`")]
    Generate {
        key: String,
        #[source]
        source: KeyStoreError,
    },

    #[error("failed to load key `{key}`")]
    Load {
        key: String,
        #[source]
        source: KeyStoreError,
    },

    #[error("failed to initialize cipher for key `{key}`")]
    InitCipher {
        key: String,
        #[source]
        source: KeyStoreError,
    },
}

impl ProvisioningError {
    /// Underlying key store error.
    pub fn cause(&self) -> &KeyStoreError {
        match self {
            ProvisioningError::Lookup { source, .. }
            | ProvisioningError::Generate { source, .. }
            | ProvisioningError::Load { source, .. }
            | ProvisioningError::InitCipher { source, .. } => source,
        }
    }
}

/// Key plus a cipher bound to it, ready to hand to the sensor.
#[derive(Debug)]
pub struct ProvisionedCipher {
    pub key: KeyHandle,
    pub crypto: CryptoObject,
}

/// Use case obtaining the biometric-bound key and a cipher for it.
pub struct ProvisionCipher {
    key_store: Arc<dyn KeyStorePort>,
    spec: KeySpec,
    policy: KeyPolicy,
}

impl ProvisionCipher {
    pub fn new(key_store: Arc<dyn KeyStorePort>, spec: KeySpec, policy: KeyPolicy) -> Self {
        Self {
            key_store,
            spec,
            policy,
        }
    }

    pub fn policy(&self) -> KeyPolicy {
        self.policy
    }

    pub fn execute(&self) -> Result<ProvisionedCipher, ProvisioningError> {
        let span = info_span!("usecase.provision_cipher", key = %self.spec.name, policy = ?self.policy);
        let _enter = span.enter();

        let key = match self.policy {
            KeyPolicy::Regenerate => self.generate()?,
            KeyPolicy::Reuse => {
                let exists = self
                    .key_store
                    .contains_key(&self.spec.name)
                    .map_err(|source| ProvisioningError::Lookup {
                        key: self.spec.name.clone(),
                        source,
                    })?;
                if exists {
                    debug!("reusing existing key");
                    self.load()?
                } else {
                    self.generate()?
                }
            }
        };

        match self.key_store.init_cipher(&key) {
            Ok(cipher) => Ok(ProvisionedCipher {
                key,
                crypto: CryptoObject::new(cipher),
            }),
            Err(KeyStoreError::KeyInvalidated(_)) if self.policy == KeyPolicy::Reuse => {
                warn!("existing key was invalidated, generating a new one");
                let key = self.generate()?;
                let crypto = self.reinit(&key)?;
                Ok(ProvisionedCipher { key, crypto })
            }
            Err(source) => Err(ProvisioningError::InitCipher {
                key: key.name().to_string(),
                source,
            }),
        }
    }

    /// Fresh cipher for an already provisioned key.
    pub fn reinit(&self, key: &KeyHandle) -> Result<CryptoObject, ProvisioningError> {
        self.key_store
            .init_cipher(key)
            .map(CryptoObject::new)
            .map_err(|source| ProvisioningError::InitCipher {
                key: key.name().to_string(),
                source,
            })
    }

    fn generate(&self) -> Result<KeyHandle, ProvisioningError> {
        let key = self
            .key_store
            .generate_key(&self.spec)
            .map_err(|source| ProvisioningError::Generate {
                key: self.spec.name.clone(),
                source,
            })?;
        info!(transformation = %self.spec.transformation(), "biometric key generated");
        Ok(key)
    }

    fn load(&self) -> Result<KeyHandle, ProvisioningError> {
        self.key_store
            .load_key(&self.spec.name)
            .map_err(|source| ProvisioningError::Load {
                key: self.spec.name.clone(),
                source,
            })
    }
}
