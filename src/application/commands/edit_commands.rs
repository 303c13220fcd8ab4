//! Edit Commands

use crate::domain::edit::{Document, SessionId};

/// 生成编辑结果命令
///
/// 表单字段都是可选的：缺少密钥/提示词时回退到默认值，缺少文档时报验证错误
#[derive(Debug, Clone, Default)]
pub struct GenerateEdit {
    pub api_key: Option<String>,
    pub prompt: Option<String>,
    pub document: Option<Document>,
}

/// 关闭会话命令
#[derive(Debug, Clone)]
pub struct CloseEditSession {
    pub session_id: SessionId,
}

/// 取出并清空会话日志
#[derive(Debug, Clone)]
pub struct RotateSessionLogs {
    pub session_id: SessionId,
}
