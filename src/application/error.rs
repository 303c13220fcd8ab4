//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::SessionStoreError;
use crate::domain::edit::{EditError, SessionId};
use crate::domain::DownloadError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: SessionId,
    },

    /// 验证错误（缺少文件、缺少密钥等）
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: SessionId) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<SessionStoreError> for ApplicationError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => Self::not_found("Session", id),
            SessionStoreError::AlreadyExists(_) => Self::InternalError(err.to_string()),
        }
    }
}

impl From<EditError> for ApplicationError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::MissingDocument | EditError::MissingApiKey => {
                Self::ValidationError(err.to_string())
            }
            EditError::InvalidTransition { .. } => Self::InvalidState(err.to_string()),
        }
    }
}

impl From<DownloadError> for ApplicationError {
    fn from(err: DownloadError) -> Self {
        Self::InternalError(err.to_string())
    }
}
