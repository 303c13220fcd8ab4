//! In-Memory Session Store Implementation

use chrono::Utc;
use dashmap::DashMap;

use crate::application::ports::{SessionStoreError, SessionStorePort};
use crate::domain::edit::{EditSession, SessionId};

/// 内存会话存储
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, EditSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorePort for InMemorySessionStore {
    fn insert(&self, session: EditSession) -> Result<SessionId, SessionStoreError> {
        let session_id = session.id();
        if self.sessions.contains_key(&session_id) {
            return Err(SessionStoreError::AlreadyExists(session_id));
        }
        self.sessions.insert(session_id, session);
        tracing::debug!(session_id = %session_id, "Session stored");
        Ok(session_id)
    }

    fn get(&self, id: SessionId) -> Result<EditSession, SessionStoreError> {
        self.sessions
            .get(&id)
            .map(|s| s.clone())
            .ok_or(SessionStoreError::NotFound(id))
    }

    fn save(&self, session: EditSession) -> Result<(), SessionStoreError> {
        let session_id = session.id();
        let mut entry = self
            .sessions
            .get_mut(&session_id)
            .ok_or(SessionStoreError::NotFound(session_id))?;
        *entry = session;
        Ok(())
    }

    fn remove(&self, id: SessionId) -> Result<(), SessionStoreError> {
        self.sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionStoreError::NotFound(id))
    }

    fn touch(&self, id: SessionId) {
        if let Some(mut session) = self.sessions.get_mut(&id) {
            session.touch();
        }
    }

    fn expired_sessions(&self, idle_secs: u64) -> Vec<SessionId> {
        let now = Utc::now();
        self.sessions
            .iter()
            .filter(|entry| entry.is_expired(now, idle_secs))
            .map(|entry| *entry.key())
            .collect()
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
