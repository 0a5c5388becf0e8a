//! Weather/time agent with a self-play evaluation harness
//!
//! The agent answers questions about the weather and local time in a city
//! using two tools. The evaluation harness pairs it with a simulated human
//! and runs a bounded conversation per task.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod agent;
pub mod config;
pub mod eval;
pub mod llm;
pub mod logging;
pub mod repl;
pub mod session;
pub mod state_machine;
pub mod tools;

#[cfg(test)]
mod testing;
