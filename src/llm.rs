//! LLM provider abstraction
//!
//! Provides a common interface for the hosted model backing every agent.

mod error;
mod gemini;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use gemini::GeminiService;
pub use types::*;

use crate::config::AgentConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Build the production service for `config`, wrapped with request logging.
///
/// A missing API key is not an error here; the first request fails instead.
pub fn connect(config: &AgentConfig) -> Result<Arc<dyn LlmService>, LlmError> {
    let gemini = GeminiService::new(
        config.api_key.clone(),
        &config.model,
        config.gateway.as_deref(),
    )?;
    Ok(Arc::new(LoggingService::new(Arc::new(gemini))))
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    messages = request.messages.len(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    tool_calls = response.tool_uses().len(),
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLlmService;

    #[tokio::test]
    async fn test_logging_service_passes_through() {
        let mock = Arc::new(MockLlmService::new("mock-model"));
        mock.queue_text("hello");
        mock.queue_error(LlmError::rate_limit("slow down"));

        let service = LoggingService::new(mock.clone());
        assert_eq!(service.model_id(), "mock-model");

        let request = LlmRequest::new("be nice", vec![LlmMessage::user_text("hi")]);
        let response = service.complete(&request).await.unwrap();
        assert_eq!(response.text(), "hello");

        let err = service.complete(&request).await.unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::RateLimit);
        assert_eq!(mock.recorded_requests().len(), 2);
    }

    #[test]
    fn test_connect_without_key_builds_service() {
        let config = AgentConfig::default();
        let service = connect(&config).unwrap();
        assert_eq!(service.model_id(), "gemini-2.0-flash");
    }
}
