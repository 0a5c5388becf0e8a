//! Line-oriented chat with the weather/time agent

use crate::agent::{Agent, AgentError, Runner};
use crate::llm::LlmService;
use crate::session::SessionKey;
use crate::tools::CityDirectory;
use futures::StreamExt;
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const APP_NAME: &str = "weather_time_repl";
const USER_ID: &str = "repl_user";
const SESSION_ID: &str = "repl_session";

const PROMPT: &str = "> ";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Error)]
pub enum ReplError {
    #[error("Failed to start session: {0}")]
    Session(#[from] AgentError),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// A runner for the weather/time agent with its REPL session already created
pub async fn start(
    llm: Arc<dyn LlmService>,
    directory: Arc<CityDirectory>,
) -> Result<(Runner, SessionKey), ReplError> {
    let runner = Runner::new(Agent::weather_time(directory), APP_NAME, llm);
    let session = runner.create_session(USER_ID, SESSION_ID).await?;
    Ok((runner, session))
}

enum Command<'a> {
    Exit,
    Clear,
    Skip,
    Message(&'a str),
}

fn parse(line: &str) -> Command<'_> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("/exit") {
        Command::Exit
    } else if line.eq_ignore_ascii_case("/clear") {
        Command::Clear
    } else if line.is_empty() {
        Command::Skip
    } else {
        Command::Message(line)
    }
}

/// Read lines from `input` until `/exit` or end of input.
///
/// Agent failures are printed and the loop moves on to the next line; only
/// terminal I/O errors end it.
pub async fn run<R, W>(
    runner: &Runner,
    session: &SessionKey,
    mut input: R,
    out: &mut W,
) -> Result<(), ReplError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        match parse(&line) {
            Command::Exit => return Ok(()),
            Command::Clear => writeln!(out, "{CLEAR_SCREEN}")?,
            Command::Skip => {}
            Command::Message(message) => {
                if let Err(e) = send(runner, session, message, out).await? {
                    tracing::warn!(session = %session, error = %e, "Agent turn failed");
                    writeln!(out, "Error: {e}")?;
                }
            }
        }
    }
}

/// Stream one agent turn to `out`. The outer error is terminal I/O, the
/// inner one the agent's.
async fn send<W: Write>(
    runner: &Runner,
    session: &SessionKey,
    message: &str,
    out: &mut W,
) -> io::Result<Result<(), AgentError>> {
    let mut events = runner.run_async(session, message);
    while let Some(event) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(e) => return Ok(Err(e)),
        };

        if event.partial {
            if let Some(text) = event.text() {
                write!(out, "{text}")?;
                out.flush()?;
            }
        }

        if event.is_final_response() {
            writeln!(out)?;
            if let Some(text) = event.text().filter(|t| !t.is_empty()) {
                writeln!(out, "{text}")?;
            }
            return Ok(Ok(()));
        }
    }
    Ok(Err(AgentError::NoFinalResponse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ContentBlock, LlmError};
    use crate::testing::MockLlmService;
    use serde_json::json;

    async fn session_with(mock: Arc<MockLlmService>) -> (Runner, SessionKey) {
        start(mock, Arc::new(CityDirectory::builtin()))
            .await
            .unwrap()
    }

    async fn drive(mock: Arc<MockLlmService>, input: &str) -> String {
        let (runner, session) = session_with(mock).await;
        let mut out = Vec::new();
        run(&runner, &session, input.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert!(matches!(parse("/exit\n"), Command::Exit));
        assert!(matches!(parse("  /EXIT "), Command::Exit));
        assert!(matches!(parse("/clear"), Command::Clear));
        assert!(matches!(parse("   \n"), Command::Skip));
        assert!(matches!(parse(" hi there \n"), Command::Message("hi there")));
    }

    #[tokio::test]
    async fn test_prints_final_reply() {
        let mock = Arc::new(MockLlmService::new("mock"));
        mock.queue_text("It's sunny in New York.");

        let printed = drive(mock.clone(), "weather in new york?\n/exit\n").await;

        assert_eq!(printed, "> \nIt's sunny in New York.\n> ");
        let requests = mock.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages.len(), 1);
    }

    #[tokio::test]
    async fn test_streams_partial_text_before_tool_call() {
        let mock = Arc::new(MockLlmService::new("mock"));
        mock.queue_response(vec![
            ContentBlock::text("Checking. "),
            ContentBlock::tool_use("call-1", "get_weather", json!({"city": "New York"})),
        ]);
        mock.queue_text("Sunny, 25 degrees.");

        let printed = drive(mock, "weather?\n").await;

        assert_eq!(printed, "> Checking. \nSunny, 25 degrees.\n> \n");
    }

    #[tokio::test]
    async fn test_blank_lines_and_clear_skip_the_model() {
        let mock = Arc::new(MockLlmService::new("mock"));

        let printed = drive(mock.clone(), "\n   \n/clear\n/exit\n").await;

        assert!(mock.recorded_requests().is_empty());
        assert_eq!(printed, format!("> > > {CLEAR_SCREEN}\n> "));
    }

    #[tokio::test]
    async fn test_errors_do_not_end_the_loop() {
        let mock = Arc::new(MockLlmService::new("mock"));
        mock.queue_error(LlmError::auth("API key not configured"));
        mock.queue_text("Second try works.");

        let printed = drive(mock.clone(), "first\nsecond\n/exit\n").await;

        assert!(printed.contains("Error: Model request failed: API key not configured\n"));
        assert!(printed.contains("Second try works.\n"));
        assert_eq!(mock.recorded_requests().len(), 2);
    }
}
