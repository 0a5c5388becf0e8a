//! Executes the self-play protocol against two responders

use super::Reporter;
use crate::agent::{AgentError, Responder};
use crate::state_machine::{
    start, transition, DialogueTurn, Effect, Event, Role, SelfPlayContext, SelfPlayState,
    StopReason, TransitionError,
};
use std::collections::VecDeque;
use thiserror::Error;

/// First thing the examiner hears, as if the subject had greeted it
pub const OPENING_MESSAGE: &str = "Hi how can I help you?";

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Failed to set up responders: {0}")]
    Setup(#[source] AgentError),
    #[error("{} failed: {source}", role.label())]
    Responder {
        role: Role,
        #[source]
        source: AgentError,
    },
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

impl EvalError {
    pub(crate) fn setup(source: AgentError) -> Self {
        Self::Setup(source)
    }
}

/// Outcome of one self-play run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRun {
    pub turns: Vec<DialogueTurn>,
    /// Iterations begun, including one cut short by the stop token
    pub iterations: u32,
    pub stop_reason: StopReason,
}

impl EvaluationRun {
    pub fn turns_by(&self, role: Role) -> impl Iterator<Item = &DialogueTurn> {
        self.turns.iter().filter(move |t| t.role == role)
    }
}

pub struct SelfPlayEvaluator<E, S> {
    examiner: E,
    subject: S,
    context: SelfPlayContext,
    opening: String,
}

impl<E: Responder, S: Responder> SelfPlayEvaluator<E, S> {
    pub fn new(examiner: E, subject: S, context: SelfPlayContext) -> Self {
        Self {
            examiner,
            subject,
            context,
            opening: OPENING_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn with_opening(mut self, opening: impl Into<String>) -> Self {
        self.opening = opening.into();
        self
    }

    pub fn examiner(&self) -> &E {
        &self.examiner
    }

    pub fn subject(&self) -> &S {
        &self.subject
    }

    /// Run until the examiner stops or the iteration budget is spent.
    ///
    /// Exactly one responder call is outstanding at any time. The first
    /// responder failure ends the run.
    pub async fn run(&mut self, reporter: &mut dyn Reporter) -> Result<EvaluationRun, EvalError> {
        let initial = start(&self.context, self.opening.clone());
        let mut state = initial.new_state;
        let mut effects: VecDeque<Effect> = initial.effects.into();

        let mut turns = Vec::new();
        let mut iterations = 0;
        let mut stop_reason = None;

        while let Some(effect) = effects.pop_front() {
            let event = match effect {
                Effect::BeginIteration { iteration } => {
                    iterations = iteration;
                    reporter.iteration_started(iteration)?;
                    None
                }
                Effect::InvokeExaminer { input } => {
                    let text = self.examiner.respond(&input).await.map_err(|source| {
                        EvalError::Responder {
                            role: Role::Examiner,
                            source,
                        }
                    })?;
                    Some(Event::ExaminerReplied { text })
                }
                Effect::InvokeSubject { input } => {
                    let text = self.subject.respond(&input).await.map_err(|source| {
                        EvalError::Responder {
                            role: Role::Subject,
                            source,
                        }
                    })?;
                    Some(Event::SubjectReplied { text })
                }
                Effect::RecordTurn(turn) => {
                    tracing::info!(
                        iteration = iterations,
                        role = ?turn.role,
                        content = %turn.content,
                        "Self-play turn"
                    );
                    reporter.turn(&turn)?;
                    turns.push(turn);
                    None
                }
                Effect::Finish { reason } => {
                    reporter.finished(reason)?;
                    stop_reason = Some(reason);
                    None
                }
            };

            if let Some(event) = event {
                let result = transition(&state, &self.context, event)?;
                state = result.new_state;
                effects.extend(result.effects);
            }
        }

        let stop_reason = match (stop_reason, state) {
            (Some(reason), _) | (None, SelfPlayState::Terminated { reason }) => reason,
            (None, state) => {
                return Err(TransitionError::InvalidTransition(format!(
                    "effects drained in non-terminal state {state:?}"
                ))
                .into())
            }
        };

        Ok(EvaluationRun {
            turns,
            iterations,
            stop_reason,
        })
    }
}
