//! Edit Context - EditSession Aggregate
//!
//! 一次编辑交互的状态机：
//! `AwaitingInput → Invoking → {Displaying, ErrorShown}`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChunkSet, EditError, EditRequest, EditResult, SessionId};
use crate::domain::chunker::ChunkConfig;
use crate::domain::log_sink::{BoundedLogBuffer, LogLevel, LogSink};

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditState {
    AwaitingInput,
    Invoking,
    Displaying,
    ErrorShown,
}

impl EditState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditState::AwaitingInput => "awaiting_input",
            EditState::Invoking => "invoking",
            EditState::Displaying => "displaying",
            EditState::ErrorShown => "error_shown",
        }
    }

    /// 是否已结束（不再接受任何转移）
    pub fn is_terminal(&self) -> bool {
        matches!(self, EditState::Displaying | EditState::ErrorShown)
    }
}

impl std::fmt::Display for EditState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 编辑会话聚合根
#[derive(Debug, Clone)]
pub struct EditSession {
    id: SessionId,
    state: EditState,
    log: BoundedLogBuffer,
    chunks: Option<ChunkSet>,
    error: Option<String>,
    document_chars: usize,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl EditSession {
    pub fn new(log_capacity: usize) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            state: EditState::AwaitingInput,
            log: BoundedLogBuffer::new(log_capacity),
            chunks: None,
            error: None,
            document_chars: 0,
            created_at: now,
            last_activity: now,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn chunks(&self) -> Option<&ChunkSet> {
        self.chunks.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn document_chars(&self) -> usize {
        self.document_chars
    }

    pub fn log(&self) -> &BoundedLogBuffer {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut BoundedLogBuffer {
        &mut self.log
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    // ========== Transitions ==========

    /// AwaitingInput → Invoking
    pub fn begin_invoke(&mut self, request: &EditRequest) -> Result<(), EditError> {
        if self.state != EditState::AwaitingInput {
            return Err(EditError::InvalidTransition {
                from: self.state,
                action: "begin_invoke",
            });
        }
        if request.document.is_empty() {
            return Err(EditError::MissingDocument);
        }

        self.document_chars = request.document.char_count();
        self.state = EditState::Invoking;
        self.log.record(
            LogLevel::Info,
            &format!(
                "Generating edited markdown ({} characters).",
                self.document_chars
            ),
        );
        self.touch();
        Ok(())
    }

    /// Invoking → Displaying | ErrorShown
    ///
    /// 成功时对结果分块；失败时只记录错误，不分块
    pub fn complete(&mut self, result: EditResult, config: &ChunkConfig) -> Result<(), EditError> {
        if self.state != EditState::Invoking {
            return Err(EditError::InvalidTransition {
                from: self.state,
                action: "complete",
            });
        }

        match result {
            EditResult::Success(text) => {
                let chunks = ChunkSet::from_text(&text, config);
                self.log.record(LogLevel::Info, "Markdown generation successful.");
                self.log.record(
                    LogLevel::Info,
                    &format!("Edited markdown split into {} part(s).", chunks.len()),
                );
                self.chunks = Some(chunks);
                self.state = EditState::Displaying;
            }
            EditResult::Failure(message) => {
                self.log.record(
                    LogLevel::Error,
                    &format!("Error during markdown generation: {}", message),
                );
                self.error = Some(message);
                self.state = EditState::ErrorShown;
            }
        }

        self.touch();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// 空闲时间是否超过 `idle_secs`
    ///
    /// 远程调用进行中的会话不过期；`idle_secs` 超出可表示范围时视为永不过期
    pub fn is_expired(&self, now: DateTime<Utc>, idle_secs: u64) -> bool {
        if self.state == EditState::Invoking {
            return false;
        }

        match i64::try_from(idle_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
        {
            Some(ttl) => now - self.last_activity > ttl,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::edit::{ApiKey, Document};

    fn request(doc: &str) -> EditRequest {
        EditRequest::new(ApiKey::new("key").unwrap(), "prompt", Document::new(doc))
    }

    #[test]
    fn test_success_path() {
        let mut session = EditSession::new(10);
        assert_eq!(session.state(), EditState::AwaitingInput);

        session.begin_invoke(&request("# doc")).unwrap();
        assert_eq!(session.state(), EditState::Invoking);
        assert_eq!(session.document_chars(), 5);

        session
            .complete(EditResult::Success("edited".to_string()), &ChunkConfig::default())
            .unwrap();
        assert_eq!(session.state(), EditState::Displaying);
        assert_eq!(session.chunks().unwrap().len(), 1);
        assert!(session.error().is_none());
    }

    #[test]
    fn test_failure_path_skips_chunking() {
        let mut session = EditSession::new(10);
        session.begin_invoke(&request("# doc")).unwrap();
        session
            .complete(
                EditResult::Failure("Request timeout".to_string()),
                &ChunkConfig::default(),
            )
            .unwrap();

        assert_eq!(session.state(), EditState::ErrorShown);
        assert!(session.chunks().is_none());
        assert_eq!(session.error(), Some("Request timeout"));
        let lines = session.log().lines();
        assert!(lines
            .last()
            .unwrap()
            .ends_with("ERROR - Error during markdown generation: Request timeout"));
    }

    #[test]
    fn test_complete_requires_invoking() {
        let mut session = EditSession::new(10);
        let err = session
            .complete(EditResult::Success(String::new()), &ChunkConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            EditError::InvalidTransition {
                from: EditState::AwaitingInput,
                action: "complete",
            }
        );
    }

    #[test]
    fn test_terminal_state_rejects_new_invoke() {
        let mut session = EditSession::new(10);
        session.begin_invoke(&request("doc")).unwrap();
        session
            .complete(EditResult::Failure("x".into()), &ChunkConfig::default())
            .unwrap();

        assert!(session.state().is_terminal());
        assert!(session.begin_invoke(&request("doc")).is_err());
    }

    #[test]
    fn test_empty_document_rejected() {
        let mut session = EditSession::new(10);
        assert_eq!(
            session.begin_invoke(&request("")),
            Err(EditError::MissingDocument)
        );
        assert_eq!(session.state(), EditState::AwaitingInput);
    }

    #[test]
    fn test_expiry() {
        let session = EditSession::new(10);
        let later = session.last_activity() + chrono::Duration::seconds(120);
        assert!(session.is_expired(later, 60));
        assert!(!session.is_expired(later, 600));
    }

    #[test]
    fn test_invoking_session_never_expires() {
        let mut session = EditSession::new(10);
        session.begin_invoke(&request("doc")).unwrap();

        let later = session.last_activity() + chrono::Duration::seconds(120);
        assert!(!session.is_expired(later, 0));
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let session = EditSession::new(10);
        let later = session.last_activity() + chrono::Duration::days(365);

        assert!(!session.is_expired(later, u64::MAX));
        assert!(!session.is_expired(later, 10u64.pow(17)));
        assert!(!session.is_expired(later, i64::MAX as u64));
    }
}
