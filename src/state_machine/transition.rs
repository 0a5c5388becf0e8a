//! Pure state transition function
//!
//! Given the same state, context and event, `transition` always produces the
//! same result and performs no I/O.

use super::{Effect, Event, Role, SelfPlayContext, SelfPlayState, StopReason};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub new_state: SelfPlayState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SelfPlayState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Self-play already terminated ({0:?})")]
    AlreadyTerminated(StopReason),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Initial state for a run opened with `opening`.
pub fn start(context: &SelfPlayContext, opening: impl Into<String>) -> TransitionResult {
    if context.max_iterations == 0 {
        return finish(StopReason::IterationsExhausted);
    }

    let opening = opening.into();
    TransitionResult::new(SelfPlayState::AwaitingExaminer {
        iteration: 1,
        input: opening.clone(),
    })
    .with_effect(Effect::BeginIteration { iteration: 1 })
    .with_effect(Effect::InvokeExaminer { input: opening })
}

pub fn transition(
    state: &SelfPlayState,
    context: &SelfPlayContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Examiner spoke: stop, or hand its words to the subject
        (SelfPlayState::AwaitingExaminer { iteration, .. }, Event::ExaminerReplied { text }) => {
            let record = Effect::record(Role::Examiner, text.clone());
            if text.contains(context.stop_token.as_str()) {
                let mut result = finish(StopReason::StopToken);
                result.effects.insert(0, record);
                return Ok(result);
            }

            Ok(TransitionResult::new(SelfPlayState::AwaitingSubject {
                iteration: *iteration,
                input: text.clone(),
            })
            .with_effect(record)
            .with_effect(Effect::InvokeSubject { input: text }))
        }

        // Subject spoke: either the budget is spent, or the next round begins
        (SelfPlayState::AwaitingSubject { iteration, .. }, Event::SubjectReplied { text }) => {
            let record = Effect::record(Role::Subject, text.clone());
            if *iteration >= context.max_iterations {
                let mut result = finish(StopReason::IterationsExhausted);
                result.effects.insert(0, record);
                return Ok(result);
            }

            let next = iteration + 1;
            Ok(TransitionResult::new(SelfPlayState::AwaitingExaminer {
                iteration: next,
                input: text.clone(),
            })
            .with_effect(record)
            .with_effect(Effect::BeginIteration { iteration: next })
            .with_effect(Effect::InvokeExaminer { input: text }))
        }

        (SelfPlayState::Terminated { reason }, _) => {
            Err(TransitionError::AlreadyTerminated(*reason))
        }

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "{event:?} while in {state:?}"
        ))),
    }
}

fn finish(reason: StopReason) -> TransitionResult {
    TransitionResult::new(SelfPlayState::Terminated { reason })
        .with_effect(Effect::Finish { reason })
}
