//! mdedit - Markdown 教案 AI 编辑服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Edit Context: 编辑会话状态机、文档与结果值对象
//! - Chunker: 按空行切分长文本
//! - Download: 单文件 / ZIP 打包
//! - LogSink: 会话内有界日志缓冲
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextGenerator, SessionStore）
//! - Invoker: 远程编辑调用，错误转为结果
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 上传表单 + RESTful API
//! - Memory: SessionStore 内存实现
//! - Worker: 过期会话清理
//! - Adapters: Gemini REST Client, Fake Generator

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
