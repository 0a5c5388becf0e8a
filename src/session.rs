//! In-memory session storage
//!
//! Sessions live for the lifetime of the process. Message logs and
//! conversation histories are append-only.

use crate::llm::LlmMessage;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session already exists: {0}")]
    AlreadyExists(SessionKey),
    #[error("Session not found: {0}")]
    NotFound(SessionKey),
}

/// Identifies a session within a session service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
}

impl SessionKey {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.app_name, self.user_id, self.session_id)
    }
}

/// Model-facing message log for one session
#[derive(Debug, Clone)]
pub struct Session {
    pub key: SessionKey,
    pub messages: Vec<LlmMessage>,
    pub created_at: DateTime<Utc>,
}

/// Process-local session store
#[derive(Debug, Default)]
pub struct InMemorySessionService {
    sessions: Mutex<HashMap<SessionKey, Session>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_session(&self, key: SessionKey) -> Result<SessionKey, SessionError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&key) {
            return Err(SessionError::AlreadyExists(key));
        }
        tracing::debug!(session = %key, "Session created");
        sessions.insert(
            key.clone(),
            Session {
                key: key.clone(),
                messages: Vec::new(),
                created_at: Utc::now(),
            },
        );
        Ok(key)
    }

    /// Snapshot of a session
    pub async fn get_session(&self, key: &SessionKey) -> Option<Session> {
        self.sessions.lock().await.get(key).cloned()
    }

    pub async fn messages(&self, key: &SessionKey) -> Result<Vec<LlmMessage>, SessionError> {
        self.sessions
            .lock()
            .await
            .get(key)
            .map(|s| s.messages.clone())
            .ok_or_else(|| SessionError::NotFound(key.clone()))
    }

    pub async fn append(&self, key: &SessionKey, message: LlmMessage) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(key)
            .ok_or_else(|| SessionError::NotFound(key.clone()))?;
        session.messages.push(message);
        Ok(())
    }
}

/// One completed request/reply pair of a responder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub input: String,
    pub reply: String,
}

/// Accumulated exchanges of one responder instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    exchanges: Vec<Exchange>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, input: impl Into<String>, reply: impl Into<String>) {
        self.exchanges.push(Exchange {
            input: input.into(),
            reply: reply.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn last(&self) -> Option<&Exchange> {
        self.exchanges.last()
    }
}
