//! Text Generator Port - 文本生成服务抽象
//!
//! 定义调用外部生成式语言模型的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::edit::ApiKey;

/// 文本生成错误
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout after {0}s")]
    Timeout(u64),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 生成请求
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// 本次调用使用的密钥（每次请求单独配置）
    pub api_key: ApiKey,
    /// 完整输入文本（prompt + 文档）
    pub input: String,
}

/// 生成响应
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// 模型输出文本
    pub text: String,
    /// 结束原因（如 STOP / MAX_TOKENS）
    pub finish_reason: Option<String>,
    /// 输入 token 数
    pub prompt_tokens: Option<u32>,
    /// 输出 token 数
    pub output_tokens: Option<u32>,
}

impl GenerationResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: None,
            prompt_tokens: None,
            output_tokens: None,
        }
    }
}

/// Text Generator Port
///
/// 外部文本生成服务的抽象接口
#[async_trait]
pub trait TextGeneratorPort: Send + Sync {
    /// 发送一次非流式生成请求
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError>;

    /// 模型标识
    fn model_name(&self) -> &str;
}
