//! Drives an agent through the model/tool loop for one message

use super::{Agent, AgentError, AgentEvent};
use crate::llm::{ContentBlock, LlmMessage, LlmRequest, LlmService};
use crate::session::{InMemorySessionService, SessionKey};
use crate::tools::ToolOutput;
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::VecDeque;
use std::sync::Arc;

/// Tool rounds allowed per message before the turn is abandoned
pub const MAX_TOOL_ROUNDS: u32 = 8;

pub struct Runner {
    agent: Agent,
    app_name: String,
    llm: Arc<dyn LlmService>,
    sessions: Arc<InMemorySessionService>,
    max_tool_rounds: u32,
}

impl Runner {
    pub fn new(agent: Agent, app_name: impl Into<String>, llm: Arc<dyn LlmService>) -> Self {
        Self {
            agent,
            app_name: app_name.into(),
            llm,
            sessions: Arc::new(InMemorySessionService::new()),
            max_tool_rounds: MAX_TOOL_ROUNDS,
        }
    }

    #[must_use]
    pub fn with_max_tool_rounds(mut self, rounds: u32) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    pub fn sessions(&self) -> &Arc<InMemorySessionService> {
        &self.sessions
    }

    pub async fn create_session(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<SessionKey, AgentError> {
        let key = SessionKey::new(self.app_name.clone(), user_id, session_id);
        Ok(self.sessions.create_session(key).await?)
    }

    /// Send `message` to the agent in `session`.
    ///
    /// The stream ends after the event marked `turn_complete`, or after the
    /// first error.
    pub fn run_async<'a>(
        &'a self,
        session: &'a SessionKey,
        message: impl Into<String>,
    ) -> BoxStream<'a, Result<AgentEvent, AgentError>> {
        let turn = Turn {
            runner: self,
            session,
            message: Some(message.into()),
            pending: VecDeque::new(),
            rounds: 0,
            finished: false,
        };

        stream::unfold(turn, |mut turn| async move {
            loop {
                if let Some(event) = turn.pending.pop_front() {
                    return Some((Ok(event), turn));
                }
                if turn.finished {
                    return None;
                }
                if let Err(e) = turn.step().await {
                    turn.finished = true;
                    return Some((Err(e), turn));
                }
            }
        })
        .boxed()
    }
}

/// In-flight state of one `run_async` call
struct Turn<'a> {
    runner: &'a Runner,
    session: &'a SessionKey,
    message: Option<String>,
    pending: VecDeque<AgentEvent>,
    rounds: u32,
    finished: bool,
}

impl Turn<'_> {
    /// One model call, plus the tool executions it asks for.
    async fn step(&mut self) -> Result<(), AgentError> {
        let runner = self.runner;
        let author = runner.agent.name.as_str();

        if let Some(text) = self.message.take() {
            runner
                .sessions
                .append(self.session, LlmMessage::user_text(text))
                .await?;
        }

        let history = runner.sessions.messages(self.session).await?;
        let request = LlmRequest::new(runner.agent.instruction.clone(), history)
            .with_tools(runner.agent.tools.definitions());
        let response = runner.llm.complete(&request).await?;

        // Unanswered function calls are not recorded, so the log stays valid
        // for the next message
        if !response.tool_uses().is_empty() && self.rounds >= runner.max_tool_rounds {
            tracing::warn!(
                agent = %author,
                rounds = self.rounds,
                "Tool round limit reached"
            );
            return Err(AgentError::ToolRoundsExceeded(runner.max_tool_rounds));
        }

        runner
            .sessions
            .append(self.session, LlmMessage::assistant(response.content.clone()))
            .await?;

        let tool_uses = response.tool_uses();
        if tool_uses.is_empty() {
            self.pending
                .push_back(AgentEvent::final_text(author, response.text()));
            self.finished = true;
            return Ok(());
        }

        let text = response.text();
        if !text.is_empty() {
            self.pending.push_back(AgentEvent::partial_text(author, text));
        }

        let mut results = Vec::with_capacity(tool_uses.len());
        for (id, name, input) in tool_uses {
            self.pending
                .push_back(AgentEvent::tool_call(author, id, name, input.clone()));

            tracing::debug!(agent = %author, tool = %name, "Executing tool");
            let output = runner
                .agent
                .tools
                .execute(name, input.clone())
                .await
                .unwrap_or_else(|| ToolOutput::error(format!("Unknown tool: {name}")));

            results.push(ContentBlock::tool_result(
                id,
                name,
                output.output.clone(),
                !output.success,
            ));
            self.pending
                .push_back(AgentEvent::tool_response(author, id, name, output));
        }

        runner
            .sessions
            .append(self.session, LlmMessage::tool_results(results))
            .await?;
        self.rounds += 1;
        Ok(())
    }
}
