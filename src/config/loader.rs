//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 默认 API Key 的环境变量
pub const DEFAULT_API_KEY_ENV: &str = "DEFAULT_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `MDEDIT_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// 未配置 `gemini.default_api_key` 时读取 `DEFAULT_API_KEY`
///
/// # 环境变量示例
/// - `MDEDIT_SERVER__PORT=8080`
/// - `MDEDIT_GEMINI__MODEL=gemini-1.5-pro`
/// - `MDEDIT_EDIT__MAX_CHUNK_CHARS=8000`
/// - `DEFAULT_API_KEY=...`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("server.max_upload_size", 10 * 1024 * 1024)?
        .set_default("gemini.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("gemini.model", "gemini-pro")?
        .set_default("gemini.timeout_secs", 60)?
        .set_default("edit.max_chunk_chars", 10_000)?
        .set_default("session.ttl_secs", 3600)?
        .set_default("session.gc_interval_secs", 300)?
        .set_default("session.log_capacity", 500)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: MDEDIT_GEMINI__TIMEOUT_SECS=120
    builder = builder.add_source(
        Environment::with_prefix("MDEDIT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    apply_default_api_key(&mut app_config, std::env::var(DEFAULT_API_KEY_ENV).ok());

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 未显式配置默认密钥时使用环境变量中的值
fn apply_default_api_key(config: &mut AppConfig, env_value: Option<String>) {
    let configured = config
        .gemini
        .default_api_key
        .as_deref()
        .map(|key| !key.trim().is_empty())
        .unwrap_or(false);

    if !configured {
        config.gemini.default_api_key = env_value.filter(|key| !key.trim().is_empty());
    }
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.gemini.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Gemini base URL cannot be empty".to_string(),
        ));
    }

    if config.gemini.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Gemini model cannot be empty".to_string(),
        ));
    }

    if config.gemini.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Gemini timeout cannot be 0".to_string(),
        ));
    }

    if config.edit.max_chunk_chars == 0 {
        return Err(ConfigError::ValidationError(
            "Max chunk chars cannot be 0".to_string(),
        ));
    }

    if config.session.log_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "Session log capacity cannot be 0".to_string(),
        ));
    }

    // 会话不能在远程调用超时之前被清理
    if config.session.ttl_secs <= config.gemini.timeout_secs {
        return Err(ConfigError::ValidationError(format!(
            "Session TTL ({}s) must be greater than Gemini timeout ({}s)",
            config.session.ttl_secs, config.gemini.timeout_secs
        )));
    }

    if config.session.gc_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Session GC interval cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    let default_key = if config.gemini.default_api_key.is_some() {
        "set (redacted)"
    } else {
        "not set"
    };

    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Max Upload Size: {} bytes", config.server.max_upload_size);
    tracing::info!("Gemini Base URL: {}", config.gemini.base_url);
    tracing::info!("Gemini Model: {}", config.gemini.model);
    tracing::info!("Gemini Timeout: {}s", config.gemini.timeout_secs);
    if let Some(max_tokens) = config.gemini.max_output_tokens {
        tracing::info!("Gemini Max Output Tokens: {}", max_tokens);
    }
    tracing::info!("Default API Key: {}", default_key);
    tracing::info!("Max Chunk Chars: {}", config.edit.max_chunk_chars);
    tracing::info!("Session TTL: {}s", config.session.ttl_secs);
    tracing::info!("Session GC Interval: {}s", config.session.gc_interval_secs);
    tracing::info!("Session Log Capacity: {}", config.session.log_capacity);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
