//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{ChunkView, EditDefaultsView, EditSessionView};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Edit DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ChunkResponse {
    pub index: usize,
    pub file_name: String,
    pub content: String,
    pub char_count: usize,
}

impl From<ChunkView> for ChunkResponse {
    fn from(view: ChunkView) -> Self {
        Self {
            index: view.index,
            file_name: view.file_name,
            content: view.content,
            char_count: view.char_count,
        }
    }
}

/// 下载信息
#[derive(Debug, Serialize)]
pub struct DownloadInfo {
    /// "single" | "archive"
    pub kind: &'static str,
    pub file_name: &'static str,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct EditSessionResponse {
    pub session_id: Uuid,
    /// "awaiting_input" | "invoking" | "displaying" | "error_shown"
    pub state: &'static str,
    pub document_chars: usize,
    pub chunks: Vec<ChunkResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<DownloadInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub logs: Vec<String>,
    pub created_at: String,
}

impl From<EditSessionView> for EditSessionResponse {
    fn from(view: EditSessionView) -> Self {
        let session_id = *view.session_id.as_uuid();
        Self {
            session_id,
            state: view.state.as_str(),
            document_chars: view.document_chars,
            chunks: view.chunks.into_iter().map(ChunkResponse::from).collect(),
            download: view.download.map(|kind| DownloadInfo {
                kind: kind.as_str(),
                file_name: kind.file_name(),
                url: format!("/api/edit/download/{}", session_id),
            }),
            error: view.error,
            logs: view.log_lines,
            created_at: view.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub session_id: Uuid,
    pub lines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EditDefaultsResponse {
    pub default_prompt: String,
    pub has_default_api_key: bool,
    pub max_chunk_chars: usize,
    pub model: String,
}

impl From<EditDefaultsView> for EditDefaultsResponse {
    fn from(view: EditDefaultsView) -> Self {
        Self {
            default_prompt: view.default_prompt,
            has_default_api_key: view.has_default_api_key,
            max_chunk_chars: view.max_chunk_chars,
            model: view.model,
        }
    }
}
