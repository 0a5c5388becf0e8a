//! Mock implementations for testing
//!
//! These mocks enable testing the runner and evaluator without a model.

use crate::agent::{AgentError, Responder};
use crate::llm::{ContentBlock, LlmError, LlmRequest, LlmResponse, LlmService, Usage};
use crate::session::ConversationState;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock LLM service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_response(&self, content: Vec<ContentBlock>) {
        self.responses.lock().unwrap().push_back(Ok(LlmResponse {
            content,
            end_turn: true,
            usage: Usage::default(),
        }));
    }

    pub fn queue_text(&self, text: &str) {
        self.queue_response(vec![ContentBlock::text(text)]);
    }

    pub fn queue_tool_call(&self, name: &str, input: Value) {
        let id = format!("call-{}", self.responses.lock().unwrap().len());
        self.queue_response(vec![ContentBlock::tool_use(id, name, input)]);
    }

    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Scripted Responder
// ============================================================================

/// Responder that replays a fixed script and records what it was sent
pub struct ScriptedResponder {
    replies: VecDeque<Result<String, LlmError>>,
    history: ConversationState,
}

impl ScriptedResponder {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(|r| Ok(r.into())).collect(),
            history: ConversationState::new(),
        }
    }

    /// Fail the next unanswered turn with `error`
    #[must_use]
    pub fn then_fail(mut self, error: LlmError) -> Self {
        self.replies.push_back(Err(error));
        self
    }

    pub fn inputs(&self) -> Vec<String> {
        self.history
            .exchanges()
            .iter()
            .map(|e| e.input.clone())
            .collect()
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    async fn respond(&mut self, input: &str) -> Result<String, AgentError> {
        let reply = self
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::unknown("Script exhausted")))?;
        self.history.record(input, reply.as_str());
        Ok(reply)
    }

    fn history(&self) -> &ConversationState {
        &self.history
    }
}
