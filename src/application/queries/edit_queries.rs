//! Edit Queries

use chrono::{DateTime, Utc};

use crate::domain::download::{part_file_name, DownloadArtifact, DownloadKind};
use crate::domain::edit::{EditSession, EditState, SessionId};

/// 获取会话详情
#[derive(Debug, Clone)]
pub struct GetEditSession {
    pub session_id: SessionId,
}

/// 获取下载文件
#[derive(Debug, Clone)]
pub struct GetDownload {
    pub session_id: SessionId,
}

/// 获取会话日志
#[derive(Debug, Clone)]
pub struct GetSessionLogs {
    pub session_id: SessionId,
}

/// 获取表单默认值
#[derive(Debug, Clone)]
pub struct GetEditDefaults;

/// 单个分块
#[derive(Debug, Clone)]
pub struct ChunkView {
    pub index: usize,
    pub file_name: String,
    pub content: String,
    pub char_count: usize,
}

/// 会话视图（命令和查询共用）
#[derive(Debug, Clone)]
pub struct EditSessionView {
    pub session_id: SessionId,
    pub state: EditState,
    pub document_chars: usize,
    pub chunks: Vec<ChunkView>,
    pub download: Option<DownloadKind>,
    pub error: Option<String>,
    pub log_lines: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&EditSession> for EditSessionView {
    fn from(session: &EditSession) -> Self {
        let chunks = session
            .chunks()
            .map(|set| {
                set.iter()
                    .enumerate()
                    .map(|(index, content)| ChunkView {
                        index,
                        file_name: part_file_name(index),
                        content: content.clone(),
                        char_count: content.chars().count(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            session_id: session.id(),
            state: session.state(),
            document_chars: session.document_chars(),
            chunks,
            download: session.chunks().map(DownloadKind::for_chunks),
            error: session.error().map(str::to_string),
            log_lines: session.log().lines(),
            created_at: session.created_at(),
        }
    }
}

/// 下载响应
pub type GetDownloadResponse = DownloadArtifact;

/// 表单默认值
#[derive(Debug, Clone)]
pub struct EditDefaultsView {
    pub default_prompt: String,
    pub has_default_api_key: bool,
    pub max_chunk_chars: usize,
    pub model: String,
}
