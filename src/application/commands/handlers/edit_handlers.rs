//! Edit Command Handlers
//!
//! GenerateEditHandler 驱动一次完整的编辑交互：
//! 校验输入 → 调用远程服务 → 分块 → 保存会话

use std::sync::Arc;

use crate::application::commands::{CloseEditSession, GenerateEdit, RotateSessionLogs};
use crate::application::error::ApplicationError;
use crate::application::invoker::RemoteEditInvoker;
use crate::application::ports::SessionStorePort;
use crate::application::queries::EditSessionView;
use crate::application::settings::EditSettings;
use crate::domain::edit::{EditError, EditRequest, EditSession};

// ============================================================================
// GenerateEdit
// ============================================================================

/// GenerateEdit Handler
pub struct GenerateEditHandler {
    session_store: Arc<dyn SessionStorePort>,
    invoker: Arc<RemoteEditInvoker>,
    settings: EditSettings,
}

impl GenerateEditHandler {
    pub fn new(
        session_store: Arc<dyn SessionStorePort>,
        invoker: Arc<RemoteEditInvoker>,
        settings: EditSettings,
    ) -> Self {
        Self {
            session_store,
            invoker,
            settings,
        }
    }

    /// 远程调用失败不会返回 Err，而是以 `error_shown` 状态的会话返回
    pub async fn handle(&self, command: GenerateEdit) -> Result<EditSessionView, ApplicationError> {
        let document = command.document.ok_or(EditError::MissingDocument)?;
        let api_key = self
            .settings
            .resolve_api_key(command.api_key.as_deref())
            .ok_or(EditError::MissingApiKey)?;
        let prompt = self.settings.resolve_prompt(command.prompt.as_deref());

        let request = EditRequest::new(api_key, prompt, document);

        let mut session = EditSession::new(self.settings.log_capacity);
        session.begin_invoke(&request)?;
        let session_id = self.session_store.insert(session.clone())?;

        tracing::info!(
            session_id = %session_id,
            doc_chars = session.document_chars(),
            model = %self.invoker.model_name(),
            "Edit session invoking"
        );

        let result = self.invoker.invoke(&request, session.log_mut()).await;
        session.complete(result, &self.settings.chunk)?;
        self.session_store.save(session.clone())?;

        match session.error() {
            Some(error) => tracing::error!(
                session_id = %session_id,
                error = %error,
                "Edit session failed"
            ),
            None => tracing::info!(
                session_id = %session_id,
                chunks = session.chunks().map(|c| c.len()).unwrap_or(0),
                "Edit session completed"
            ),
        }

        Ok(EditSessionView::from(&session))
    }
}

// ============================================================================
// CloseEditSession
// ============================================================================

/// CloseEditSession Handler
pub struct CloseEditSessionHandler {
    session_store: Arc<dyn SessionStorePort>,
}

impl CloseEditSessionHandler {
    pub fn new(session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { session_store }
    }

    pub fn handle(&self, command: CloseEditSession) -> Result<(), ApplicationError> {
        self.session_store.remove(command.session_id)?;
        tracing::info!(session_id = %command.session_id, "Edit session closed");
        Ok(())
    }
}

// ============================================================================
// RotateSessionLogs
// ============================================================================

/// RotateSessionLogs Handler - 取出日志并清空缓冲
pub struct RotateSessionLogsHandler {
    session_store: Arc<dyn SessionStorePort>,
}

impl RotateSessionLogsHandler {
    pub fn new(session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { session_store }
    }

    pub fn handle(&self, command: RotateSessionLogs) -> Result<Vec<String>, ApplicationError> {
        let mut session = self.session_store.get(command.session_id)?;
        let lines = session.log_mut().rotate();
        session.touch();
        self.session_store.save(session)?;
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GenerationError;
    use crate::domain::chunker::ChunkConfig;
    use crate::domain::download::DownloadKind;
    use crate::domain::edit::{ApiKey, Document, EditState};
    use crate::infrastructure::adapters::{FakeTextGenerator, FakeTextGeneratorConfig};
    use crate::infrastructure::memory::InMemorySessionStore;

    fn handler(
        config: FakeTextGeneratorConfig,
        settings: EditSettings,
    ) -> (GenerateEditHandler, Arc<InMemorySessionStore>, Arc<FakeTextGenerator>) {
        let store = Arc::new(InMemorySessionStore::new());
        let generator = Arc::new(FakeTextGenerator::new(config));
        let invoker = Arc::new(RemoteEditInvoker::new(generator.clone()));
        (
            GenerateEditHandler::new(store.clone(), invoker, settings),
            store,
            generator,
        )
    }

    fn command(doc: &str) -> GenerateEdit {
        GenerateEdit {
            api_key: Some("user-key".to_string()),
            prompt: Some("请编辑".to_string()),
            document: Some(Document::new(doc)),
        }
    }

    #[tokio::test]
    async fn test_short_response_takes_single_download_path() {
        let (handler, store, _) = handler(
            FakeTextGeneratorConfig::fixed("y".repeat(500)),
            EditSettings::default(),
        );

        let view = handler.handle(command("# 教案")).await.unwrap();

        assert_eq!(view.state, EditState::Displaying);
        assert_eq!(view.chunks.len(), 1);
        assert_eq!(view.download, Some(DownloadKind::Single));
        assert!(view.error.is_none());
        assert_eq!(store.get(view.session_id).unwrap().state(), EditState::Displaying);
    }

    #[tokio::test]
    async fn test_long_response_takes_archive_path() {
        let paragraph = format!("{}\n\n", "段".repeat(98));
        let (handler, _, _) = handler(
            FakeTextGeneratorConfig::fixed(paragraph.repeat(10)),
            EditSettings {
                chunk: ChunkConfig::new(300),
                ..Default::default()
            },
        );

        let view = handler.handle(command("doc")).await.unwrap();

        assert_eq!(view.download, Some(DownloadKind::Archive));
        assert!(view.chunks.len() > 1);
        assert!(view.chunks.iter().all(|c| c.char_count <= 300));
    }

    #[tokio::test]
    async fn test_gc_sweep_during_remote_call_keeps_session() {
        use crate::infrastructure::worker::{SessionGcConfig, SessionGcWorker};

        let (handler, store, _) = handler(
            FakeTextGeneratorConfig::fixed("# 已编辑").with_delay(1500),
            EditSettings::default(),
        );
        let gc = SessionGcWorker::new(
            SessionGcConfig {
                interval_secs: 1,
                ttl_secs: 1,
            },
            store.clone(),
        );

        // 清理发生在远程调用返回之前，且会话已空闲超过 ttl
        let (result, removed) = tokio::join!(handler.handle(command("# 教案")), async {
            tokio::time::sleep(std::time::Duration::from_millis(1200)).await;
            gc.sweep()
        });

        assert_eq!(removed, 0);
        let view = result.unwrap();
        assert_eq!(view.state, EditState::Displaying);
        assert_eq!(store.get(view.session_id).unwrap().state(), EditState::Displaying);
    }

    #[tokio::test]
    async fn test_timeout_moves_to_error_shown_without_chunking() {
        let (handler, store, _) = handler(
            FakeTextGeneratorConfig::failing(GenerationError::Timeout(60)),
            EditSettings::default(),
        );

        let view = handler.handle(command("# 教案")).await.unwrap();

        assert_eq!(view.state, EditState::ErrorShown);
        assert!(view.chunks.is_empty());
        assert!(view.download.is_none());
        assert_eq!(view.error.as_deref(), Some("Request timeout after 60s"));

        let stored = store.get(view.session_id).unwrap();
        assert!(stored.chunks().is_none());
        assert!(view
            .log_lines
            .iter()
            .any(|l| l.contains("Error during markdown generation: Request timeout after 60s")));
    }

    #[tokio::test]
    async fn test_missing_document_is_validation_error() {
        let (handler, store, generator) =
            handler(FakeTextGeneratorConfig::echo(), EditSettings::default());

        let err = handler
            .handle(GenerateEdit {
                api_key: Some("key".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(generator.calls(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_without_default_is_validation_error() {
        let (handler, _, generator) =
            handler(FakeTextGeneratorConfig::echo(), EditSettings::default());

        let err = handler
            .handle(GenerateEdit {
                api_key: Some("   ".to_string()),
                document: Some(Document::new("doc")),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_default_key_and_prompt_are_used() {
        let settings = EditSettings {
            default_api_key: ApiKey::new("env-key"),
            default_prompt: "默认提示".to_string(),
            ..Default::default()
        };
        let (handler, _, generator) = handler(FakeTextGeneratorConfig::echo(), settings);

        let view = handler
            .handle(GenerateEdit {
                document: Some(Document::new("正文")),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(view.chunks[0].content, "默认提示\n\n正文");
        assert_eq!(generator.last_api_key().as_deref(), Some("env-key"));
    }

    #[tokio::test]
    async fn test_rotate_and_close() {
        let (handler, store, _) =
            handler(FakeTextGeneratorConfig::echo(), EditSettings::default());
        let view = handler.handle(command("doc")).await.unwrap();
        let id = view.session_id;

        let rotate = RotateSessionLogsHandler::new(store.clone());
        let lines = rotate.handle(RotateSessionLogs { session_id: id }).unwrap();
        assert_eq!(lines, view.log_lines);
        assert!(store.get(id).unwrap().log().is_empty());

        let close = CloseEditSessionHandler::new(store.clone());
        close.handle(CloseEditSession { session_id: id }).unwrap();
        assert!(store.get(id).is_err());
        assert!(close.handle(CloseEditSession { session_id: id }).is_err());
    }
}
