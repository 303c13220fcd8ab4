//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CloseEditSessionHandler, GenerateEditHandler, RotateSessionLogsHandler,
    // Query handlers
    GetDownloadHandler, GetEditDefaultsHandler, GetEditSessionHandler, GetSessionLogsHandler,
    // Ports
    EditSettings, RemoteEditInvoker, SessionStorePort, TextGeneratorPort,
};

/// 默认上传大小限制（10MB）
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub session_store: Arc<dyn SessionStorePort>,
    pub settings: EditSettings,
    pub model: String,
    pub max_upload_size: usize,

    // ========== Command Handlers ==========
    pub generate_edit_handler: GenerateEditHandler,
    pub close_session_handler: CloseEditSessionHandler,
    pub rotate_logs_handler: RotateSessionLogsHandler,

    // ========== Query Handlers ==========
    pub get_session_handler: GetEditSessionHandler,
    pub get_download_handler: GetDownloadHandler,
    pub get_logs_handler: GetSessionLogsHandler,
    pub get_defaults_handler: GetEditDefaultsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        session_store: Arc<dyn SessionStorePort>,
        generator: Arc<dyn TextGeneratorPort>,
        settings: EditSettings,
    ) -> Self {
        let model = generator.model_name().to_string();
        let invoker = Arc::new(RemoteEditInvoker::new(generator));

        Self {
            session_store: session_store.clone(),
            settings: settings.clone(),
            model: model.clone(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,

            // Command handlers
            generate_edit_handler: GenerateEditHandler::new(
                session_store.clone(),
                invoker,
                settings.clone(),
            ),
            close_session_handler: CloseEditSessionHandler::new(session_store.clone()),
            rotate_logs_handler: RotateSessionLogsHandler::new(session_store.clone()),

            // Query handlers
            get_session_handler: GetEditSessionHandler::new(session_store.clone()),
            get_download_handler: GetDownloadHandler::new(session_store.clone()),
            get_logs_handler: GetSessionLogsHandler::new(session_store.clone()),
            get_defaults_handler: GetEditDefaultsHandler::new(settings, model),
        }
    }

    /// 设置上传大小限制
    pub fn with_max_upload_size(mut self, bytes: usize) -> Self {
        self.max_upload_size = bytes;
        self
    }
}
