//! Interactive chat with the weather/time agent

use std::sync::Arc;
use weather_time_agent::config::AgentConfig;
use weather_time_agent::tools::CityDirectory;
use weather_time_agent::{llm, logging, repl};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = AgentConfig::from_default_location()?;
    let llm = llm::connect(&config)?;
    tracing::info!(model = %llm.model_id(), "Starting REPL");

    let (runner, session) = repl::start(llm, Arc::new(CityDirectory::builtin())).await?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    tokio::select! {
        result = repl::run(&runner, &session, stdin, &mut stdout) => result?,
        _ = tokio::signal::ctrl_c() => println!("\nExiting..."),
    }

    Ok(())
}
