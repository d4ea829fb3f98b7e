//! # Dependency Injection / 依赖注入模块
//!
//! Creates the platform adapters named by the configuration and groups them
//! into `FingerprintAuthenticatorDeps`.
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**: the gate, key policy and
//! session rules live in `fp-app`. This module only assembles.
//! 仅用于"组装"，不用于"决策"。

use std::sync::Arc;

use fp_app::{FingerprintAuthenticatorDeps, KeyPolicy};
use fp_core::{
    config::AppConfig,
    crypto::DEFAULT_KEY_NAME,
    ports::{BiometricCapabilityPort, FingerprintSensorPort, KeyStorePort},
    KeySpec,
};
use fp_platform::{InMemoryKeyStore, SimulatedDevice, SimulatedSensor, SystemKeyStore};
use tracing::{info, warn};

fn create_key_store(kind: &str) -> Arc<dyn KeyStorePort> {
    match kind {
        "system" => Arc::new(SystemKeyStore::new()),
        "memory" | "" => Arc::new(InMemoryKeyStore::new()),
        other => {
            warn!(key_store = %other, "unknown key store kind, using in-memory store");
            Arc::new(InMemoryKeyStore::new())
        }
    }
}

fn key_name(config: &AppConfig) -> &str {
    if config.key_name.is_empty() {
        DEFAULT_KEY_NAME
    } else {
        &config.key_name
    }
}

/// Wire all authenticator dependencies from configuration
/// 根据配置组装认证门面的全部依赖
pub fn wire_dependencies(config: &AppConfig) -> FingerprintAuthenticatorDeps {
    let capabilities: Arc<dyn BiometricCapabilityPort> =
        Arc::new(SimulatedDevice::from_profile(&config.device));
    let sensor: Arc<dyn FingerprintSensorPort> =
        Arc::new(SimulatedSensor::from_script(&config.sensor));
    let key_store = create_key_store(&config.device.key_store);
    let key_policy = KeyPolicy::from_config(&config.key_policy);

    info!(
        key = key_name(config),
        key_store = %config.device.key_store,
        ?key_policy,
        "authenticator dependencies wired"
    );

    FingerprintAuthenticatorDeps {
        capabilities,
        key_store,
        sensor,
        key_spec: KeySpec::biometric_bound(key_name(config)),
        key_policy,
    }
}
