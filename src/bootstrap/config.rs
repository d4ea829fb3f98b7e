//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file into the `AppConfig` DTO. No validation and no
//! defaulting happens here: missing values are accepted as empty facts and
//! interpreted by the layers that consume them.
//! 仅纯数据加载，接受文件中的任何内容。

use std::path::PathBuf;

use anyhow::Context;
use fp_core::config::AppConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Config from `path` if given, otherwise the built-in ready-device profile.
pub fn load_or_default(path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(AppConfig::with_defaults()),
    }
}
