//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：生成编辑、关闭会话、轮转日志

mod edit_commands;

pub mod handlers;

pub use edit_commands::*;
