//! Gemini Adapter - 生成式语言服务客户端实现

mod fake_text_generator;
mod http_gemini_client;

pub use fake_text_generator::{FakeBehavior, FakeTextGenerator, FakeTextGeneratorConfig};
pub use http_gemini_client::*;
