//! Console output for evaluation runs

use super::EvalError;
use crate::state_machine::{DialogueTurn, StopReason};
use std::io::{self, Write};

/// Receives progress notifications from the evaluator
pub trait Reporter {
    fn task_started(&mut self, task: &str) -> io::Result<()>;
    fn iteration_started(&mut self, iteration: u32) -> io::Result<()>;
    fn turn(&mut self, turn: &DialogueTurn) -> io::Result<()>;
    fn finished(&mut self, reason: StopReason) -> io::Result<()>;
    fn task_failed(&mut self, error: &EvalError) -> io::Result<()>;
}

/// Writes the human-readable transcript
pub struct ConsoleReporter<W> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn task_started(&mut self, task: &str) -> io::Result<()> {
        writeln!(self.out, "========== Task:\n{task}\n==========")?;
        self.out.flush()
    }

    fn iteration_started(&mut self, iteration: u32) -> io::Result<()> {
        writeln!(self.out, "========== Iteration {iteration} ==========")
    }

    fn turn(&mut self, turn: &DialogueTurn) -> io::Result<()> {
        writeln!(self.out, "[{}]: {}", turn.role.label(), turn.content)?;
        self.out.flush()
    }

    fn finished(&mut self, reason: StopReason) -> io::Result<()> {
        // Running out of iterations ends silently
        if reason == StopReason::StopToken {
            writeln!(self.out, "Eval agent stopped the conversation.")?;
        }
        self.out.flush()
    }

    fn task_failed(&mut self, error: &EvalError) -> io::Result<()> {
        writeln!(self.out, "Evaluation failed: {error}")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::Role;

    #[test]
    fn test_console_format() {
        let mut out = Vec::new();
        let mut reporter = ConsoleReporter::new(&mut out);
        reporter.task_started("Ask about the weather.").unwrap();
        reporter.iteration_started(1).unwrap();
        reporter
            .turn(&DialogueTurn::new(Role::Examiner, "Weather in New York?"))
            .unwrap();
        reporter
            .turn(&DialogueTurn::new(Role::Subject, "Sunny."))
            .unwrap();
        reporter.finished(StopReason::IterationsExhausted).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "========== Task:\nAsk about the weather.\n==========\n\
             ========== Iteration 1 ==========\n\
             [Eval Agent]: Weather in New York?\n\
             [Root Agent]: Sunny.\n"
        );
    }

    #[test]
    fn test_stop_token_announced() {
        let mut out = Vec::new();
        ConsoleReporter::new(&mut out)
            .finished(StopReason::StopToken)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Eval agent stopped the conversation.\n"
        );
    }
}
