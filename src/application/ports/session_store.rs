//! Session Store Port - 编辑会话存储
//!
//! 会话只保存在内存中，具体实现在 infrastructure/memory 层

use thiserror::Error;

use crate::domain::edit::{EditSession, SessionId};

/// Session Store 错误
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session already exists: {0}")]
    AlreadyExists(SessionId),
}

/// Session Store Port
pub trait SessionStorePort: Send + Sync {
    /// 保存新会话
    fn insert(&self, session: EditSession) -> Result<SessionId, SessionStoreError>;

    /// 获取会话快照
    fn get(&self, id: SessionId) -> Result<EditSession, SessionStoreError>;

    /// 覆盖已存在的会话
    fn save(&self, session: EditSession) -> Result<(), SessionStoreError>;

    /// 删除会话
    fn remove(&self, id: SessionId) -> Result<(), SessionStoreError>;

    /// 更新最后活动时间
    fn touch(&self, id: SessionId);

    /// 空闲超过 `idle_secs` 的会话
    fn expired_sessions(&self, idle_secs: u64) -> Vec<SessionId>;

    /// 当前会话数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
