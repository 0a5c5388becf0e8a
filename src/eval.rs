//! Self-play evaluation harness
//!
//! A simulated human (the examiner) talks to the weather/time agent (the
//! subject) for a bounded number of rounds per task.

mod evaluator;
mod reporter;
mod tasks;

pub use evaluator::{EvalError, EvaluationRun, SelfPlayEvaluator, OPENING_MESSAGE};
pub use reporter::{ConsoleReporter, Reporter};
pub use tasks::TASKS;

use crate::agent::{Agent, Runner, RunnerResponder};
use crate::llm::LlmService;
use crate::state_machine::SelfPlayContext;
use crate::tools::CityDirectory;
use std::sync::Arc;

const APP_NAME: &str = "agent_eval";
const USER_ID: &str = "eval_user";

/// Run one task with fresh examiner and subject sessions.
pub async fn run_task(
    task: &str,
    context: SelfPlayContext,
    llm: Arc<dyn LlmService>,
    directory: Arc<CityDirectory>,
    reporter: &mut dyn Reporter,
) -> Result<EvaluationRun, EvalError> {
    let examiner_runner = Runner::new(Agent::simulated_human(task), APP_NAME, llm.clone());
    let subject_runner = Runner::new(Agent::weather_time(directory), APP_NAME, llm);

    let examiner = RunnerResponder::start(examiner_runner, USER_ID, "eval_session")
        .await
        .map_err(EvalError::setup)?;
    let subject = RunnerResponder::start(subject_runner, USER_ID, "root_session")
        .await
        .map_err(EvalError::setup)?;

    SelfPlayEvaluator::new(examiner, subject, context)
        .run(reporter)
        .await
}

/// Run every task in order. A failed task is reported and the remaining
/// tasks still run; the number of failures is returned.
pub async fn run_all(
    tasks: &[&str],
    context: &SelfPlayContext,
    llm: Arc<dyn LlmService>,
    directory: Arc<CityDirectory>,
    reporter: &mut dyn Reporter,
) -> Result<usize, std::io::Error> {
    let mut failures = 0;
    for task in tasks {
        reporter.task_started(task)?;
        match run_task(task, context.clone(), llm.clone(), directory.clone(), reporter).await {
            Ok(run) => {
                tracing::info!(
                    iterations = run.iterations,
                    turns = run.turns.len(),
                    stop_reason = ?run.stop_reason,
                    "Evaluation finished"
                );
            }
            Err(EvalError::Io(e)) => return Err(e),
            Err(e) => {
                tracing::error!(error = %e, "Evaluation failed");
                reporter.task_failed(&e)?;
                failures += 1;
            }
        }
    }
    Ok(failures)
}
