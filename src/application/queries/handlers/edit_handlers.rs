//! Edit Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SessionStorePort;
use crate::application::queries::edit_queries::*;
use crate::application::settings::EditSettings;
use crate::domain::download::package_chunks;
use crate::domain::edit::EditState;

/// GetEditSession Handler
pub struct GetEditSessionHandler {
    session_store: Arc<dyn SessionStorePort>,
}

impl GetEditSessionHandler {
    pub fn new(session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { session_store }
    }

    pub fn handle(&self, query: GetEditSession) -> Result<EditSessionView, ApplicationError> {
        let session = self.session_store.get(query.session_id)?;
        self.session_store.touch(query.session_id);
        Ok(EditSessionView::from(&session))
    }
}

/// GetDownload Handler - 单文件或 ZIP
pub struct GetDownloadHandler {
    session_store: Arc<dyn SessionStorePort>,
}

impl GetDownloadHandler {
    pub fn new(session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { session_store }
    }

    pub fn handle(&self, query: GetDownload) -> Result<GetDownloadResponse, ApplicationError> {
        let session = self.session_store.get(query.session_id)?;

        let chunks = match (session.state(), session.chunks()) {
            (EditState::Displaying, Some(chunks)) => chunks,
            (state, _) => {
                return Err(ApplicationError::invalid_state(format!(
                    "Session {} has no edited document to download (state: {})",
                    query.session_id, state
                )))
            }
        };

        let artifact = package_chunks(chunks)?;
        self.session_store.touch(query.session_id);

        tracing::info!(
            session_id = %query.session_id,
            kind = artifact.kind.as_str(),
            size = artifact.bytes.len(),
            "Download packaged"
        );

        Ok(artifact)
    }
}

/// GetSessionLogs Handler
pub struct GetSessionLogsHandler {
    session_store: Arc<dyn SessionStorePort>,
}

impl GetSessionLogsHandler {
    pub fn new(session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { session_store }
    }

    pub fn handle(&self, query: GetSessionLogs) -> Result<Vec<String>, ApplicationError> {
        let session = self.session_store.get(query.session_id)?;
        Ok(session.log().lines())
    }
}

/// GetEditDefaults Handler
pub struct GetEditDefaultsHandler {
    settings: EditSettings,
    model: String,
}

impl GetEditDefaultsHandler {
    pub fn new(settings: EditSettings, model: impl Into<String>) -> Self {
        Self {
            settings,
            model: model.into(),
        }
    }

    pub fn handle(&self, _query: GetEditDefaults) -> EditDefaultsView {
        EditDefaultsView {
            default_prompt: self.settings.default_prompt.clone(),
            has_default_api_key: self.settings.default_api_key.is_some(),
            max_chunk_chars: self.settings.chunk.max_chars,
            model: self.model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chunker::ChunkConfig;
    use crate::domain::download::DownloadKind;
    use crate::domain::edit::{ApiKey, Document, EditRequest, EditResult, EditSession, SessionId};
    use crate::infrastructure::memory::InMemorySessionStore;

    fn store_with(result: Option<EditResult>, max_chars: usize) -> (Arc<InMemorySessionStore>, SessionId) {
        let store = Arc::new(InMemorySessionStore::new());
        let mut session = EditSession::new(50);
        if let Some(result) = result {
            let request =
                EditRequest::new(ApiKey::new("k").unwrap(), "p", Document::new("doc"));
            session.begin_invoke(&request).unwrap();
            session.complete(result, &ChunkConfig::new(max_chars)).unwrap();
        }
        let id = store.insert(session).unwrap();
        (store, id)
    }

    #[test]
    fn test_get_session_view() {
        let (store, id) = store_with(Some(EditResult::Success("abc\n\ndef".into())), 5);
        let handler = GetEditSessionHandler::new(store);

        let view = handler.handle(GetEditSession { session_id: id }).unwrap();
        assert_eq!(view.state, EditState::Displaying);
        assert_eq!(view.chunks.len(), 2);
        assert_eq!(view.chunks[1].file_name, "edited_document_2.md");
        assert_eq!(view.chunks[1].content, "\n\ndef");
        assert_eq!(view.download, Some(DownloadKind::Archive));
    }

    #[test]
    fn test_get_unknown_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = GetEditSessionHandler::new(store);

        let err = handler
            .handle(GetEditSession {
                session_id: SessionId::new(),
            })
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[test]
    fn test_download_single_file() {
        let (store, id) = store_with(Some(EditResult::Success("x".repeat(500))), 10_000);
        let handler = GetDownloadHandler::new(store);

        let artifact = handler.handle(GetDownload { session_id: id }).unwrap();
        assert_eq!(artifact.kind, DownloadKind::Single);
        assert_eq!(artifact.file_name, "edited_document.md");
        assert_eq!(artifact.bytes.len(), 500);
    }

    #[test]
    fn test_download_rejected_after_failure() {
        let (store, id) = store_with(Some(EditResult::Failure("boom".into())), 10_000);
        let handler = GetDownloadHandler::new(store);

        let err = handler.handle(GetDownload { session_id: id }).unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidState(_)));
    }

    #[test]
    fn test_download_rejected_before_generation() {
        let (store, id) = store_with(None, 10_000);
        let handler = GetDownloadHandler::new(store);
        assert!(handler.handle(GetDownload { session_id: id }).is_err());
    }

    #[test]
    fn test_session_logs() {
        let (store, id) = store_with(Some(EditResult::Failure("boom".into())), 10_000);
        let handler = GetSessionLogsHandler::new(store);

        let lines = handler.handle(GetSessionLogs { session_id: id }).unwrap();
        assert!(lines.iter().any(|l| l.contains("Error during markdown generation: boom")));
    }

    #[test]
    fn test_defaults() {
        let settings = EditSettings {
            default_api_key: ApiKey::new("env-key"),
            ..Default::default()
        };
        let handler = GetEditDefaultsHandler::new(settings, "gemini-pro");

        let view = handler.handle(GetEditDefaults);
        assert!(view.has_default_api_key);
        assert_eq!(view.max_chunk_chars, 10_000);
        assert_eq!(view.model, "gemini-pro");
    }
}
