//! Session GC Worker - 清理空闲会话

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::SessionStorePort;

/// GC 配置
#[derive(Debug, Clone)]
pub struct SessionGcConfig {
    /// 扫描间隔（秒）
    pub interval_secs: u64,
    /// 会话空闲过期时间（秒）
    pub ttl_secs: u64,
}

impl Default for SessionGcConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            ttl_secs: 3600,
        }
    }
}

/// 会话 GC Worker
pub struct SessionGcWorker {
    config: SessionGcConfig,
    session_store: Arc<dyn SessionStorePort>,
}

impl SessionGcWorker {
    pub fn new(config: SessionGcConfig, session_store: Arc<dyn SessionStorePort>) -> Self {
        Self {
            config,
            session_store,
        }
    }

    /// 执行一次清理，返回删除的会话数
    pub fn sweep(&self) -> usize {
        let expired = self.session_store.expired_sessions(self.config.ttl_secs);
        let mut removed = 0;

        for session_id in expired {
            if self.session_store.remove(session_id).is_ok() {
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!(
                removed = removed,
                remaining = self.session_store.len(),
                "Expired edit sessions removed"
            );
        }

        removed
    }

    /// 启动 Worker（永不返回）
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.config.interval_secs,
            ttl_secs = self.config.ttl_secs,
            "SessionGcWorker started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(self.config.interval_secs.max(1)));
        // 第一次 tick 立即返回
        interval.tick().await;

        loop {
            interval.tick().await;
            self.sweep();
        }
    }
}
