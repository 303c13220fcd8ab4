//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：会话详情、下载、日志、默认值

mod edit_queries;

pub mod handlers;

pub use edit_queries::*;
