//! Domain Layer - 领域层
//!
//! - Edit Context: 编辑会话与状态机
//! - chunker: 长文本分块
//! - download: 下载打包（单文件 / ZIP）
//! - log_sink: 会话日志缓冲

pub mod chunker;
pub mod download;
pub mod edit;
pub mod log_sink;

pub use chunker::{chunk_text, chunk_text_default, ChunkConfig, DEFAULT_MAX_CHUNK_CHARS};
pub use download::{package_chunks, DownloadArtifact, DownloadError, DownloadKind};
pub use log_sink::{BoundedLogBuffer, LogLevel, LogSink};
