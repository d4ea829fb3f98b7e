//! # Pure Data Module / 纯数据模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No policy interpretation / 禁止策略解析** (the app layer parses
//! `key.policy` and `sensor.outcome`)

use crate::crypto::DEFAULT_KEY_NAME;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Logical key store entry name
    pub key_name: String,

    /// Raw key policy string ("reuse" / "regenerate"), interpreted by the app layer
    pub key_policy: String,

    /// Capability profile of the simulated device
    pub device: DeviceProfile,

    /// Script played by the simulated sensor
    pub sensor: SensorScript,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub api_level: u32,
    pub sensor: bool,
    pub permission: bool,
    pub enrolled: bool,
    pub lock_screen: bool,
    /// "memory" or "system"
    pub key_store: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorScript {
    /// "success" / "failure" / "error"
    pub outcome: String,
    pub error_code: i32,
    pub error_message: String,
    /// Help messages emitted before the terminal outcome
    pub help: Vec<String>,
    pub step_delay_ms: u64,
}

fn section<'a>(value: &'a toml::Value, name: &str, key: &str) -> Option<&'a toml::Value> {
    value.get(name).and_then(|s| s.get(key))
}

fn str_field(value: &toml::Value, name: &str, key: &str) -> String {
    section(value, name, key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

fn bool_field(value: &toml::Value, name: &str, key: &str) -> bool {
    section(value, name, key)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Out-of-range integers are treated like missing ones.
fn int_field<T: TryFrom<i64> + Default>(value: &toml::Value, name: &str, key: &str) -> T {
    section(value, name, key)
        .and_then(|v| v.as_integer())
        .and_then(|v| T::try_from(v).ok())
        .unwrap_or_default()
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// **Prohibited / 禁止**: missing values become empty/zero "facts";
    /// nothing is validated here.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let help = section(toml_value, "sensor", "help")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            key_name: str_field(toml_value, "key", "name"),
            key_policy: str_field(toml_value, "key", "policy"),
            device: DeviceProfile {
                api_level: int_field(toml_value, "device", "api_level"),
                sensor: bool_field(toml_value, "device", "sensor"),
                permission: bool_field(toml_value, "device", "permission"),
                enrolled: bool_field(toml_value, "device", "enrolled"),
                lock_screen: bool_field(toml_value, "device", "lock_screen"),
                key_store: str_field(toml_value, "device", "key_store"),
            },
            sensor: SensorScript {
                outcome: str_field(toml_value, "sensor", "outcome"),
                error_code: int_field(toml_value, "sensor", "error_code"),
                error_message: str_field(toml_value, "sensor", "error_message"),
                help,
                step_delay_ms: int_field(toml_value, "sensor", "step_delay_ms"),
            },
        })
    }

    /// Fully capable device whose sensor recognizes the finger
    /// 具备全部能力且指纹识别成功的设备配置
    pub fn with_defaults() -> Self {
        Self {
            key_name: DEFAULT_KEY_NAME.to_string(),
            key_policy: "reuse".to_string(),
            device: DeviceProfile {
                api_level: 23,
                sensor: true,
                permission: true,
                enrolled: true,
                lock_screen: true,
                key_store: "memory".to_string(),
            },
            sensor: SensorScript {
                outcome: "success".to_string(),
                error_code: 0,
                error_message: String::new(),
                help: Vec::new(),
                step_delay_ms: 400,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_parses_all_sections() {
        let toml_str = r#"
            [key]
            name = "vault"
            policy = "regenerate"

            [device]
            api_level = 28
            sensor = true
            permission = true
            enrolled = false
            lock_screen = true
            key_store = "system"

            [sensor]
            outcome = "error"
            error_code = 7
            error_message = "Too many attempts"
            help = ["Sensor dirty", "Too fast"]
            step_delay_ms = 10
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.key_name, "vault");
        assert_eq!(config.key_policy, "regenerate");
        assert_eq!(config.device.api_level, 28);
        assert!(!config.device.enrolled);
        assert_eq!(config.device.key_store, "system");
        assert_eq!(config.sensor.outcome, "error");
        assert_eq!(config.sensor.error_code, 7);
        assert_eq!(config.sensor.help, vec!["Sensor dirty", "Too fast"]);
        assert_eq!(config.sensor.step_delay_ms, 10);
    }

    #[test]
    fn test_from_toml_returns_empty_values_when_missing() {
        let toml_value: Value = toml::from_str("[device]\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        // Empty values are valid "facts"
        assert_eq!(config.key_name, "");
        assert_eq!(config.key_policy, "");
        assert_eq!(config.device.api_level, 0);
        assert!(!config.device.sensor);
        assert!(config.sensor.help.is_empty());
    }

    #[test]
    fn test_from_toml_treats_out_of_range_integers_as_missing() {
        let toml_str = r#"
            [device]
            api_level = -1

            [sensor]
            error_code = 4294967296
            step_delay_ms = -5
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.device.api_level, 0);
        assert_eq!(config.sensor.error_code, 0);
        assert_eq!(config.sensor.step_delay_ms, 0);
    }

    #[test]
    fn test_with_defaults_describes_ready_device() {
        let config = AppConfig::with_defaults();

        assert_eq!(config.key_name, DEFAULT_KEY_NAME);
        assert_eq!(config.device.api_level, 23);
        assert!(config.device.sensor && config.device.permission);
        assert!(config.device.enrolled && config.device.lock_screen);
        assert_eq!(config.sensor.outcome, "success");
    }
}
