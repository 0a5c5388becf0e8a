//! Events yielded while an agent works on one message

use crate::tools::ToolOutput;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Text(String),
    ToolCall {
        id: String,
        name: String,
        args: Value,
    },
    ToolResponse {
        id: String,
        name: String,
        output: ToolOutput,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentEvent {
    /// Name of the agent that produced the event
    pub author: String,
    pub payload: EventPayload,
    /// Text that will be followed by more output in the same response
    pub partial: bool,
    /// End-of-response marker
    pub turn_complete: bool,
}

impl AgentEvent {
    pub fn partial_text(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            payload: EventPayload::Text(text.into()),
            partial: true,
            turn_complete: false,
        }
    }

    pub fn final_text(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            payload: EventPayload::Text(text.into()),
            partial: false,
            turn_complete: true,
        }
    }

    pub fn tool_call(author: impl Into<String>, id: &str, name: &str, args: Value) -> Self {
        Self {
            author: author.into(),
            payload: EventPayload::ToolCall {
                id: id.to_string(),
                name: name.to_string(),
                args,
            },
            partial: false,
            turn_complete: false,
        }
    }

    pub fn tool_response(author: impl Into<String>, id: &str, name: &str, output: ToolOutput) -> Self {
        Self {
            author: author.into(),
            payload: EventPayload::ToolResponse {
                id: id.to_string(),
                name: name.to_string(),
                output,
            },
            partial: false,
            turn_complete: false,
        }
    }

    pub fn is_final_response(&self) -> bool {
        self.turn_complete && !self.partial
    }

    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::Text(text) => Some(text),
            _ => None,
        }
    }
}
