//! HTTP Routes
//!
//! API Endpoints:
//! - /                              GET   上传表单页面
//! - /api/ping                      GET   健康检查
//! - /api/edit/defaults             GET   表单默认值
//! - /api/edit/generate             POST  上传 markdown 并生成编辑结果（multipart）
//! - /api/edit/get                  POST  获取会话详情
//! - /api/edit/close                POST  关闭会话
//! - /api/edit/download/:session_id GET   下载编辑结果
//! - /api/edit/logs/:session_id     GET   获取会话日志
//! - /api/edit/logs/rotate          POST  取出并清空会话日志

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/edit", edit_routes())
}

/// Edit 路由
fn edit_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/defaults", get(handlers::get_defaults))
        .route("/generate", post(handlers::generate_edit))
        .route("/get", post(handlers::get_session))
        .route("/close", post(handlers::close_session))
        .route("/download/:session_id", get(handlers::download))
        .route("/logs/rotate", post(handlers::rotate_logs))
        .route("/logs/:session_id", get(handlers::get_logs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    use crate::application::{EditSettings, GenerationError};
    use crate::infrastructure::adapters::gemini::{FakeTextGenerator, FakeTextGeneratorConfig};
    use crate::infrastructure::memory::InMemorySessionStore;

    const BOUNDARY: &str = "mdedit-test-boundary";

    fn test_app(config: FakeTextGeneratorConfig) -> Router {
        let store = Arc::new(InMemorySessionStore::new());
        let generator = Arc::new(FakeTextGenerator::new(config));
        let state = AppState::new(store, generator, EditSettings::default());
        create_routes().with_state(Arc::new(state))
    }

    fn multipart_body(api_key: &str, file: Option<(&str, &str)>) -> String {
        let mut body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"api_key\"\r\n\r\n{k}\r\n",
            b = BOUNDARY,
            k = api_key
        );
        if let Some((name, content)) = file {
            body.push_str(&format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{n}\"\r\nContent-Type: text/markdown\r\n\r\n{c}\r\n",
                b = BOUNDARY,
                n = name,
                c = content
            ));
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));
        body
    }

    fn generate_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/edit/generate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = test_app(FakeTextGeneratorConfig::echo());
        let response = app
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "fake");
    }

    #[tokio::test]
    async fn test_index_page_contains_default_prompt() {
        let app = test_app(FakeTextGeneratorConfig::echo());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("空间分析师"));
        assert!(page.contains("/api/edit/generate"));
    }

    #[tokio::test]
    async fn test_generate_then_download_single_file() {
        let app = test_app(FakeTextGeneratorConfig::fixed("# Edited\n\nbody"));

        let response = app
            .clone()
            .oneshot(generate_request(multipart_body(
                "key",
                Some(("lesson.md", "# Lesson\n\n🚩：补充内容")),
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["state"], "displaying");
        assert_eq!(body["data"]["chunks"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["download"]["kind"], "single");

        let url = body["data"]["download"]["url"].as_str().unwrap().to_string();
        let response = app
            .oneshot(Request::builder().uri(url).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"edited_document.md\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"# Edited\n\nbody");
    }

    #[tokio::test]
    async fn test_generate_without_file_is_validation_error() {
        let app = test_app(FakeTextGeneratorConfig::echo());

        let response = app
            .oneshot(generate_request(multipart_body("key", None)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_ne!(body["errno"], 0);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_generate_failure_is_returned_as_data() {
        let app = test_app(FakeTextGeneratorConfig::failing(GenerationError::Timeout(60)));

        let response = app
            .clone()
            .oneshot(generate_request(multipart_body(
                "key",
                Some(("lesson.md", "# Lesson")),
            )))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["state"], "error_shown");
        assert!(body["data"]["download"].is_null());
        assert!(body["data"]["error"]
            .as_str()
            .unwrap()
            .contains("timeout"));

        // 失败会话不可下载
        let session_id = body["data"]["session_id"].as_str().unwrap().to_string();
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/edit/download/{}", session_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_ne!(body["errno"], 0);
    }

    #[tokio::test]
    async fn test_rotate_logs_drains_buffer() {
        let app = test_app(FakeTextGeneratorConfig::fixed("done"));

        let response = app
            .clone()
            .oneshot(generate_request(multipart_body(
                "key",
                Some(("lesson.md", "# Lesson")),
            )))
            .await
            .unwrap();
        let body = json_body(response).await;
        let session_id = body["data"]["session_id"].as_str().unwrap().to_string();

        let rotate = |id: String| {
            Request::builder()
                .method("POST")
                .uri("/api/edit/logs/rotate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!("{{\"session_id\":\"{}\"}}", id)))
                .unwrap()
        };

        let body = json_body(app.clone().oneshot(rotate(session_id.clone())).await.unwrap()).await;
        assert!(!body["data"]["lines"].as_array().unwrap().is_empty());

        let body = json_body(app.oneshot(rotate(session_id)).await.unwrap()).await;
        assert!(body["data"]["lines"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let app = test_app(FakeTextGeneratorConfig::echo());

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/edit/logs/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_ne!(body["errno"], 0);
    }
}
