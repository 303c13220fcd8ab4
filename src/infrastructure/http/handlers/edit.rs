//! Edit HTTP Handlers

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    CloseEditSession, GenerateEdit, GetDownload, GetEditDefaults, GetEditSession, GetSessionLogs,
    RotateSessionLogs,
};
use crate::domain::edit::{Document, SessionId};
use crate::infrastructure::http::dto::{
    ApiResponse, EditDefaultsResponse, EditSessionResponse, Empty, LogsResponse, SessionRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

const MARKDOWN_EXTENSIONS: &[&str] = &[".md", ".markdown"];

/// 判断上传文件是否为 markdown
fn is_markdown_upload(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    let by_name = file_name
        .map(|name| {
            let lower = name.to_lowercase();
            MARKDOWN_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        })
        .unwrap_or(false);
    let by_type = content_type
        .map(|ct| ct.starts_with("text/"))
        .unwrap_or(false);

    by_name || by_type
}

// ============================================================================
// Handlers
// ============================================================================

/// 表单默认值
pub async fn get_defaults(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<EditDefaultsResponse>> {
    let view = state.get_defaults_handler.handle(GetEditDefaults);
    Json(ApiResponse::success(view.into()))
}

/// 上传 markdown 并生成编辑结果
///
/// multipart 字段: file（必填）、api_key、prompt
pub async fn generate_edit(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<EditSessionResponse>>, ApiError> {
    let mut command = GenerateEdit::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "api_key" => {
                command.api_key = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read api_key: {}", e)))?,
                );
            }
            "prompt" => {
                command.prompt = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read prompt: {}", e)))?,
                );
            }
            "file" => {
                let file_name = field.file_name().map(|s| s.to_string());
                let content_type = field.content_type().map(|s| s.to_string());

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

                // 浏览器未选择文件时会提交空的 file 字段
                if bytes.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
                    continue;
                }

                if !is_markdown_upload(file_name.as_deref(), content_type.as_deref()) {
                    return Err(ApiError::BadRequest(
                        "Only Markdown files (.md) are allowed".to_string(),
                    ));
                }

                if bytes.len() > state.max_upload_size {
                    return Err(ApiError::BadRequest(format!(
                        "File too large. Maximum size is {} MB",
                        state.max_upload_size / 1024 / 1024
                    )));
                }

                let document = Document::from_bytes(bytes.to_vec()).map_err(|_| {
                    ApiError::BadRequest("File must be valid UTF-8 text".to_string())
                })?;

                tracing::info!(
                    file_name = ?file_name,
                    doc_chars = document.char_count(),
                    "Markdown uploaded"
                );
                command.document = Some(document);
            }
            _ => {}
        }
    }

    let view = state.generate_edit_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(view.into())))
}

/// 获取会话详情
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<EditSessionResponse>>, ApiError> {
    let query = GetEditSession {
        session_id: SessionId::from_uuid(req.session_id),
    };

    let view = state.get_session_handler.handle(query)?;

    Ok(Json(ApiResponse::success(view.into())))
}

/// 关闭会话
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = CloseEditSession {
        session_id: SessionId::from_uuid(req.session_id),
    };

    state.close_session_handler.handle(command)?;

    Ok(Json(ApiResponse::ok()))
}

/// 下载编辑结果（单文件或 ZIP）
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let query = GetDownload {
        session_id: SessionId::from_uuid(session_id),
    };

    let artifact = state.get_download_handler.handle(query)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.mime)
        .header(header::CONTENT_LENGTH, artifact.bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name),
        )
        .body(Body::from(artifact.bytes))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

/// 获取会话日志
pub async fn get_logs(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApiResponse<LogsResponse>>, ApiError> {
    let query = GetSessionLogs {
        session_id: SessionId::from_uuid(session_id),
    };

    let lines = state.get_logs_handler.handle(query)?;

    Ok(Json(ApiResponse::success(LogsResponse { session_id, lines })))
}

/// 取出并清空会话日志
pub async fn rotate_logs(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<LogsResponse>>, ApiError> {
    let command = RotateSessionLogs {
        session_id: SessionId::from_uuid(req.session_id),
    };

    let lines = state.rotate_logs_handler.handle(command)?;

    Ok(Json(ApiResponse::success(LogsResponse {
        session_id: req.session_id,
        lines,
    })))
}
