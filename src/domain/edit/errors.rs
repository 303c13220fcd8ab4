//! Edit Context - Errors

use thiserror::Error;

use super::EditState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("请上传 Markdown 文件")]
    MissingDocument,

    #[error("请输入 API Key")]
    MissingApiKey,

    #[error("状态 {from} 下不允许操作: {action}")]
    InvalidTransition {
        from: EditState,
        action: &'static str,
    },
}
