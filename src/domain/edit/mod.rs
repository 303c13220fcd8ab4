//! Edit Context - 编辑会话限界上下文
//!
//! 职责:
//! - 编辑请求与结果值对象
//! - 会话状态机
//! - 分块结果

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::{EditSession, EditState};
pub use errors::EditError;
pub use value_objects::{ApiKey, ChunkSet, Document, EditRequest, EditResult, SessionId};
