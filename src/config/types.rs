//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::application::{EditSettings, DEFAULT_PROMPT};
use crate::domain::chunker::{ChunkConfig, DEFAULT_MAX_CHUNK_CHARS};
use crate::domain::edit::ApiKey;
use crate::domain::log_sink::DEFAULT_LOG_CAPACITY;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini 配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// 编辑流程配置
    #[serde(default)]
    pub edit: EditConfig,

    /// 会话配置
    #[serde(default)]
    pub session: SessionConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 构造编辑流程设置
    pub fn edit_settings(&self) -> EditSettings {
        EditSettings {
            default_api_key: self
                .gemini
                .default_api_key
                .as_deref()
                .and_then(|key| ApiKey::new(key)),
            default_prompt: self.edit.default_prompt.clone(),
            chunk: ChunkConfig::new(self.edit.max_chunk_chars),
            log_capacity: self.session.log_capacity,
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 上传文件大小上限（字节）
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

fn default_max_upload_size() -> usize {
    10 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Gemini 配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API 基础 URL
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// 模型标识
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_gemini_timeout")]
    pub timeout_secs: u64,

    /// 最大输出 token 数
    #[serde(default)]
    pub max_output_tokens: Option<u32>,

    /// 默认 API Key（表单留空时使用）
    #[serde(default)]
    pub default_api_key: Option<String>,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_gemini_timeout() -> u64 {
    60
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            timeout_secs: default_gemini_timeout(),
            max_output_tokens: None,
            default_api_key: None,
        }
    }
}

/// 编辑流程配置
#[derive(Debug, Clone, Deserialize)]
pub struct EditConfig {
    /// 单个分块的最大字符数
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// 默认提示词
    #[serde(default = "default_prompt")]
    pub default_prompt: String,
}

fn default_max_chunk_chars() -> usize {
    DEFAULT_MAX_CHUNK_CHARS
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
            default_prompt: default_prompt(),
        }
    }
}

/// 会话配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 会话空闲过期时间（秒）
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,

    /// 过期会话清理间隔（秒）
    #[serde(default = "default_gc_interval")]
    pub gc_interval_secs: u64,

    /// 每个会话保留的日志行数
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

fn default_session_ttl() -> u64 {
    3600
}

fn default_gc_interval() -> u64 {
    300
}

fn default_log_capacity() -> usize {
    DEFAULT_LOG_CAPACITY
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
            gc_interval_secs: default_gc_interval(),
            log_capacity: default_log_capacity(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
