//! Effects produced by state transitions

use super::state::{DialogueTurn, Role, StopReason};

/// Effects to be executed, in order, after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A new examiner/subject round pair begins
    BeginIteration { iteration: u32 },

    /// Ask the examiner for its next turn
    InvokeExaminer { input: String },

    /// Ask the subject for its next turn
    InvokeSubject { input: String },

    /// Append a turn to the transcript
    RecordTurn(DialogueTurn),

    /// The run is over
    Finish { reason: StopReason },
}

impl Effect {
    pub fn record(role: Role, content: impl Into<String>) -> Self {
        Effect::RecordTurn(DialogueTurn::new(role, content))
    }
}
