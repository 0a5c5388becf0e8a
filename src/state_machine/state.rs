//! Self-play state types

use serde::{Deserialize, Serialize};

/// Literal the examiner emits to end the conversation
pub const STOP_TOKEN: &str = "<STOP>";

/// Which side of the self-play produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The agent under evaluation
    Subject,
    /// The simulated human
    Examiner,
}

impl Role {
    /// Console label
    pub fn label(self) -> &'static str {
        match self {
            Role::Subject => "Root Agent",
            Role::Examiner => "Eval Agent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub role: Role,
    pub content: String,
}

impl DialogueTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The examiner's reply contained the stop token
    StopToken,
    /// `max_iterations` round pairs completed
    IterationsExhausted,
}

/// Protocol state. Iterations are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelfPlayState {
    AwaitingExaminer { iteration: u32, input: String },
    AwaitingSubject { iteration: u32, input: String },
    Terminated { reason: StopReason },
}

impl SelfPlayState {
    pub fn iteration(&self) -> Option<u32> {
        match self {
            SelfPlayState::AwaitingExaminer { iteration, .. }
            | SelfPlayState::AwaitingSubject { iteration, .. } => Some(*iteration),
            SelfPlayState::Terminated { .. } => None,
        }
    }
}

/// Immutable run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfPlayContext {
    pub max_iterations: u32,
    pub stop_token: String,
}

impl SelfPlayContext {
    pub fn new(max_iterations: u32) -> Self {
        Self {
            max_iterations,
            stop_token: STOP_TOKEN.to_string(),
        }
    }
}
