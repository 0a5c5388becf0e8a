//! The conversational capability consumed by the evaluator

use super::{AgentError, Runner};
use crate::session::{ConversationState, SessionKey};
use async_trait::async_trait;
use futures::StreamExt;

/// Continues a conversation: given new input, returns the final reply text.
#[async_trait]
pub trait Responder: Send {
    async fn respond(&mut self, input: &str) -> Result<String, AgentError>;

    /// Exchanges completed so far, oldest first
    fn history(&self) -> &ConversationState;
}

/// A [`Runner`] bound to one session
pub struct RunnerResponder {
    runner: Runner,
    session: SessionKey,
    history: ConversationState,
}

impl RunnerResponder {
    /// Create the session and bind it.
    pub async fn start(runner: Runner, user_id: &str, session_id: &str) -> Result<Self, AgentError> {
        let session = runner.create_session(user_id, session_id).await?;
        Ok(Self {
            runner,
            session,
            history: ConversationState::new(),
        })
    }

    pub fn session(&self) -> &SessionKey {
        &self.session
    }
}

#[async_trait]
impl Responder for RunnerResponder {
    async fn respond(&mut self, input: &str) -> Result<String, AgentError> {
        let mut reply = None;
        {
            let mut events = self.runner.run_async(&self.session, input);
            while let Some(event) = events.next().await {
                let event = event?;
                if event.is_final_response() {
                    reply = Some(event.text().unwrap_or_default().to_string());
                    break;
                }
            }
        }

        let reply = reply.ok_or(AgentError::NoFinalResponse)?;
        self.history.record(input, reply.as_str());
        Ok(reply)
    }

    fn history(&self) -> &ConversationState {
        &self.history
    }
}
