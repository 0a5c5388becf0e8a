//! Self-play protocol state machine
//!
//! Pure transitions in the Elm style: the evaluator feeds responder replies
//! in as events and executes the effects that come back.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{DialogueTurn, Role, SelfPlayContext, SelfPlayState, StopReason, STOP_TOKEN};
pub use transition::{start, transition, TransitionError, TransitionResult};
