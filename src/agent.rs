//! Agent runtime
//!
//! An [`Agent`] is a prompt plus a tool set. A [`Runner`] drives one agent
//! against the model for a session, yielding [`AgentEvent`]s; a
//! [`RunnerResponder`] turns that into the [`Responder`] capability used by
//! the self-play evaluator.

mod event;
mod responder;
mod runner;

pub use event::{AgentEvent, EventPayload};
pub use responder::{Responder, RunnerResponder};
pub use runner::{Runner, MAX_TOOL_ROUNDS};

use crate::llm::LlmError;
use crate::session::SessionError;
use crate::tools::{CityDirectory, ToolRegistry};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Model request failed: {0}")]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Model kept requesting tools after {0} rounds")]
    ToolRoundsExceeded(u32),
    #[error("Response ended without a final reply")]
    NoFinalResponse,
}

/// Static definition of an agent
#[derive(Clone)]
pub struct Agent {
    pub name: String,
    pub description: String,
    pub instruction: String,
    pub tools: ToolRegistry,
}

impl Agent {
    /// The agent under evaluation: answers time and weather questions
    pub fn weather_time(directory: Arc<CityDirectory>) -> Self {
        Self {
            name: "weather_time_agent".to_string(),
            description: "Agent to answer questions about the time and weather in a city."
                .to_string(),
            instruction: "You are a helpful agent who can answer user questions about the time \
                          and weather in a city."
                .to_string(),
            tools: ToolRegistry::weather_time(directory),
        }
    }

    /// A simulated human pursuing `task`, used as the examiner in self-play
    pub fn simulated_human(task: impl Into<String>) -> Self {
        Self {
            name: "eval_agent".to_string(),
            description: "Simulated human agent for evaluation".to_string(),
            instruction: task.into(),
            tools: ToolRegistry::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_definitions() {
        let subject = Agent::weather_time(Arc::new(CityDirectory::builtin()));
        assert_eq!(subject.tools.definitions().len(), 2);

        let examiner = Agent::simulated_human("You want to know the weather.");
        assert!(examiner.tools.is_empty());
        assert_eq!(examiner.instruction, "You want to know the weather.");
    }
}
