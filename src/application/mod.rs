//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextGenerator、SessionStore）
//! - invoker: 远程编辑调用
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - settings: 编辑流程设置
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod invoker;
pub mod ports;
pub mod queries;
pub mod settings;

// Re-exports
pub use commands::{
    CloseEditSession,
    GenerateEdit,
    RotateSessionLogs,
    // Handlers
    handlers::{CloseEditSessionHandler, GenerateEditHandler, RotateSessionLogsHandler},
};

pub use error::ApplicationError;
pub use invoker::RemoteEditInvoker;

pub use ports::{
    // Session store
    SessionStoreError,
    SessionStorePort,
    // Text generator
    GenerationError,
    GenerationRequest,
    GenerationResponse,
    TextGeneratorPort,
};

pub use queries::{
    ChunkView,
    EditDefaultsView,
    EditSessionView,
    GetDownload,
    GetDownloadResponse,
    GetEditDefaults,
    GetEditSession,
    GetSessionLogs,
    // Handlers
    handlers::{
        GetDownloadHandler, GetEditDefaultsHandler, GetEditSessionHandler, GetSessionLogsHandler,
    },
};

pub use settings::{EditSettings, DEFAULT_PROMPT};
