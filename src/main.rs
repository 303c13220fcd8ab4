//! mdedit - Markdown 教案 AI 编辑服务

use std::sync::Arc;

use mdedit::config::{load_config, print_config, AppConfig};
use mdedit::infrastructure::adapters::{HttpGeminiClient, HttpGeminiClientConfig};
use mdedit::infrastructure::http::{AppState, HttpServer, ServerConfig};
use mdedit::infrastructure::memory::InMemorySessionStore;
use mdedit::infrastructure::worker::{SessionGcConfig, SessionGcWorker};

/// 初始化日志
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},mdedit={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("mdedit - Markdown 教案 AI 编辑服务");
    print_config(&config);

    // 创建 Gemini 客户端
    let gemini_config = HttpGeminiClientConfig::new(&config.gemini.base_url, &config.gemini.model)
        .with_timeout(config.gemini.timeout_secs)
        .with_max_output_tokens(config.gemini.max_output_tokens);
    let generator = Arc::new(
        HttpGeminiClient::new(gemini_config)
            .map_err(|e| anyhow::anyhow!("Failed to create Gemini client: {}", e))?,
    );

    // 创建内存会话存储
    let session_store = Arc::new(InMemorySessionStore::new());

    // 启动过期会话清理
    let gc_worker = SessionGcWorker::new(
        SessionGcConfig {
            interval_secs: config.session.gc_interval_secs,
            ttl_secs: config.session.ttl_secs,
        },
        session_store.clone(),
    );
    tokio::spawn(gc_worker.run());

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_upload_size(config.server.max_upload_size);
    let state = AppState::new(session_store, generator, config.edit_settings());

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
