//! Remote Edit Invoker
//!
//! 将一次编辑请求发送到外部生成服务，任何错误都转为 `EditResult::Failure`

use std::sync::Arc;

use crate::application::ports::{GenerationRequest, TextGeneratorPort};
use crate::domain::edit::{EditRequest, EditResult};
use crate::domain::log_sink::{LogLevel, LogSink};

pub struct RemoteEditInvoker {
    generator: Arc<dyn TextGeneratorPort>,
}

impl RemoteEditInvoker {
    pub fn new(generator: Arc<dyn TextGeneratorPort>) -> Self {
        Self { generator }
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    /// 执行一次远程编辑
    ///
    /// 调用阻塞当前交互直到返回或超时；错误作为数据返回，不向上传播
    pub async fn invoke(
        &self,
        request: &EditRequest,
        log: &mut (dyn LogSink + Send),
    ) -> EditResult {
        let generation = GenerationRequest {
            api_key: request.api_key.clone(),
            input: request.combined_input(),
        };

        log.record(LogLevel::Info, "Initiating Gemini API call.");
        tracing::info!(
            model = %self.generator.model_name(),
            input_chars = generation.input.chars().count(),
            "Initiating generation request"
        );

        match self.generator.generate(generation).await {
            Ok(response) => {
                log.record(LogLevel::Info, "Gemini API call completed.");
                tracing::info!(
                    model = %self.generator.model_name(),
                    output_chars = response.text.chars().count(),
                    finish_reason = ?response.finish_reason,
                    prompt_tokens = ?response.prompt_tokens,
                    output_tokens = ?response.output_tokens,
                    "Generation request completed"
                );
                EditResult::Success(response.text)
            }
            Err(e) => {
                log.record(
                    LogLevel::Error,
                    &format!("An error occurred during Gemini API call: {}", e),
                );
                tracing::error!(
                    model = %self.generator.model_name(),
                    error = %e,
                    "Generation request failed"
                );
                EditResult::Failure(e.to_string())
            }
        }
    }
}
