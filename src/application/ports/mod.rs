//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod session_store;
mod text_generator;

pub use session_store::{SessionStoreError, SessionStorePort};
pub use text_generator::{
    GenerationError, GenerationRequest, GenerationResponse, TextGeneratorPort,
};
