//! Weather lookup tool

use super::{city_schema, CityDirectory, CityInput, Tool, ToolOutput, ToolResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Retrieve the weather report for `city`.
pub fn lookup_weather(directory: &CityDirectory, city: &str) -> ToolResult {
    match directory.find(city).and_then(|r| r.weather_report.as_deref()) {
        Some(report) => ToolResult::success(report),
        None => ToolResult::error(format!("Weather information for '{city}' is not available.")),
    }
}

pub struct WeatherTool {
    directory: Arc<CityDirectory>,
}

impl WeatherTool {
    pub fn new(directory: Arc<CityDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &'static str {
        "get_weather"
    }

    fn description(&self) -> String {
        "Retrieves the current weather report for a specified city.".to_string()
    }

    fn input_schema(&self) -> Value {
        city_schema("The name of the city for which to retrieve the weather report")
    }

    async fn run(&self, input: Value) -> ToolOutput {
        match serde_json::from_value::<CityInput>(input) {
            Ok(input) => lookup_weather(&self.directory, &input.city).into(),
            Err(e) => ToolOutput::error(format!("Invalid input: {e}")),
        }
    }
}
