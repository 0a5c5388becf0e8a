//! Self-play evaluation of the weather/time agent over the built-in tasks

use std::process::ExitCode;
use std::sync::Arc;
use weather_time_agent::config::AgentConfig;
use weather_time_agent::eval::{self, ConsoleReporter, TASKS};
use weather_time_agent::state_machine::SelfPlayContext;
use weather_time_agent::tools::CityDirectory;
use weather_time_agent::{llm, logging};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    logging::init();

    let config = AgentConfig::from_default_location()?;
    let llm = llm::connect(&config)?;
    let context = SelfPlayContext::new(config.max_iterations);
    let directory = Arc::new(CityDirectory::builtin());
    let mut reporter = ConsoleReporter::stdout();

    tracing::info!(
        model = %llm.model_id(),
        tasks = TASKS.len(),
        max_iterations = context.max_iterations,
        "Starting evaluation"
    );

    tokio::select! {
        failures = eval::run_all(&TASKS, &context, llm, directory, &mut reporter) => {
            let failures = failures?;
            if failures > 0 {
                tracing::warn!(failures, "Some evaluation tasks failed");
                return Ok(ExitCode::FAILURE);
            }
        }
        _ = tokio::signal::ctrl_c() => println!("\nGoodbye!"),
    }

    Ok(ExitCode::SUCCESS)
}
