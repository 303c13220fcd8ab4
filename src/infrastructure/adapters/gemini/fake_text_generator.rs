//! Fake Text Generator - 用于测试和离线运行的生成器
//!
//! 不访问网络，按配置返回固定文本、回显输入或返回错误

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{
    GenerationError, GenerationRequest, GenerationResponse, TextGeneratorPort,
};

/// 返回行为
#[derive(Debug, Clone)]
pub enum FakeBehavior {
    /// 原样返回输入
    Echo,
    /// 返回固定文本
    Fixed(String),
    /// 返回错误
    Fail(GenerationError),
}

/// Fake Text Generator 配置
#[derive(Debug, Clone)]
pub struct FakeTextGeneratorConfig {
    pub behavior: FakeBehavior,
    /// 模拟延迟（毫秒）
    pub delay_ms: u64,
}

impl FakeTextGeneratorConfig {
    pub fn echo() -> Self {
        Self {
            behavior: FakeBehavior::Echo,
            delay_ms: 0,
        }
    }

    pub fn fixed(text: impl Into<String>) -> Self {
        Self {
            behavior: FakeBehavior::Fixed(text.into()),
            delay_ms: 0,
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        Self {
            behavior: FakeBehavior::Fail(error),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl Default for FakeTextGeneratorConfig {
    fn default() -> Self {
        Self::echo()
    }
}

/// Fake Text Generator
pub struct FakeTextGenerator {
    config: FakeTextGeneratorConfig,
    calls: AtomicUsize,
    last_api_key: Mutex<Option<String>>,
}

impl FakeTextGenerator {
    pub fn new(config: FakeTextGeneratorConfig) -> Self {
        tracing::info!(behavior = ?config.behavior, "FakeTextGenerator initialized");
        Self {
            config,
            calls: AtomicUsize::new(0),
            last_api_key: Mutex::new(None),
        }
    }

    /// 已收到的请求数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 最近一次请求使用的密钥
    pub fn last_api_key(&self) -> Option<String> {
        self.last_api_key
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl TextGeneratorPort for FakeTextGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_api_key.lock() {
            *guard = Some(request.api_key.expose().to_string());
        }

        tracing::debug!(
            input_len = request.input.len(),
            "FakeTextGenerator: returning configured response"
        );

        if self.config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
        }

        match &self.config.behavior {
            FakeBehavior::Echo => Ok(GenerationResponse::text(request.input)),
            FakeBehavior::Fixed(text) => Ok(GenerationResponse::text(text.clone())),
            FakeBehavior::Fail(error) => Err(error.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}
