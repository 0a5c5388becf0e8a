//! Tool implementations exposed to the weather/time agent
//!
//! Lookups are plain functions over a [`CityDirectory`]; the [`Tool`]
//! wrappers only parse model-supplied JSON and serialize the result.

mod directory;
mod time;
mod weather;

pub use directory::{CityDirectory, CityRecord};
pub use time::{lookup_time, lookup_time_at, TimeTool};
pub use weather::{lookup_weather, WeatherTool};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Outcome of a city lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResult {
    Success {
        report: String,
    },
    Error {
        #[serde(rename = "error_message")]
        message: String,
    },
}

impl ToolResult {
    pub fn success(report: impl Into<String>) -> Self {
        Self::Success {
            report: report.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Result from tool execution, as handed back to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub success: bool,
    pub output: String,
}

impl ToolOutput {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: message.into(),
        }
    }
}

impl From<ToolResult> for ToolOutput {
    fn from(result: ToolResult) -> Self {
        let (success, body) = match result {
            ToolResult::Success { report } => {
                (true, serde_json::json!({"status": "success", "report": report}))
            }
            ToolResult::Error { message } => (
                false,
                serde_json::json!({"status": "error", "error_message": message}),
            ),
        };
        Self {
            success,
            output: body.to_string(),
        }
    }
}

/// Input shared by both lookup tools
#[derive(Debug, Deserialize)]
pub(crate) struct CityInput {
    pub city: String,
}

pub(crate) fn city_schema(description: &str) -> Value {
    serde_json::json!({
        "type": "object",
        "required": ["city"],
        "properties": {
            "city": {
                "type": "string",
                "description": description
            }
        }
    })
}

/// Trait for tools that can be executed by the agent
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name
    fn name(&self) -> &str;

    /// Tool description for LLM
    fn description(&self) -> String;

    /// JSON schema for tool input
    fn input_schema(&self) -> Value;

    /// Execute the tool
    async fn run(&self, input: Value) -> ToolOutput;
}

/// Collection of tools available to an agent
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Registry with no tools
    pub fn empty() -> Self {
        Self::default()
    }

    /// Weather and time lookups over `directory`
    pub fn weather_time(directory: Arc<CityDirectory>) -> Self {
        Self {
            tools: vec![
                Arc::new(WeatherTool::new(directory.clone())),
                Arc::new(TimeTool::new(directory)),
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tool definitions for LLM
    pub fn definitions(&self) -> Vec<crate::llm::ToolDefinition> {
        self.tools
            .iter()
            .map(|t| crate::llm::ToolDefinition {
                name: t.name().to_string(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, input: Value) -> Option<ToolOutput> {
        for tool in &self.tools {
            if tool.name() == name {
                return Some(tool.run(input).await);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_result_wire_format() {
        let ok = serde_json::to_value(ToolResult::success("sunny")).unwrap();
        assert_eq!(ok, json!({"status": "success", "report": "sunny"}));

        let err = serde_json::to_value(ToolResult::error("nope")).unwrap();
        assert_eq!(err, json!({"status": "error", "error_message": "nope"}));
    }

    #[test]
    fn test_tool_output_carries_wire_format() {
        for result in [ToolResult::success("sunny"), ToolResult::error("nope")] {
            let output = ToolOutput::from(result.clone());
            assert_eq!(output.success, result.is_success());
            let parsed: ToolResult = serde_json::from_str(&output.output).unwrap();
            assert_eq!(parsed, result);
        }
    }

    #[test]
    fn test_weather_time_registered() {
        let registry = ToolRegistry::weather_time(Arc::new(CityDirectory::builtin()));
        let names: Vec<_> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["get_weather", "get_current_time"]);
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let registry = ToolRegistry::weather_time(Arc::new(CityDirectory::builtin()));
        assert!(registry.execute("bash", json!({})).await.is_none());
        assert!(ToolRegistry::empty().is_empty());
    }

    #[tokio::test]
    async fn test_execute_dispatches_by_name() {
        let registry = ToolRegistry::weather_time(Arc::new(CityDirectory::builtin()));
        let output = registry
            .execute("get_weather", json!({"city": "new york"}))
            .await
            .unwrap();
        assert!(output.success);
        assert!(output.output.contains("sunny"));
    }
}
