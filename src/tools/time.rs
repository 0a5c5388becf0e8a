//! Current time lookup tool

use super::{city_schema, CityDirectory, CityInput, Tool, ToolOutput, ToolResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z%z";

/// Current local time in `city`.
pub fn lookup_time(directory: &CityDirectory, city: &str) -> ToolResult {
    lookup_time_at(directory, city, Utc::now())
}

/// Local time in `city` at `now`.
pub fn lookup_time_at(directory: &CityDirectory, city: &str, now: DateTime<Utc>) -> ToolResult {
    let Some(tz) = directory.find(city).and_then(|r| r.timezone) else {
        return ToolResult::error(format!(
            "Sorry, I don't have timezone information for {city}."
        ));
    };

    let local = now.with_timezone(&tz);
    ToolResult::success(format!(
        "The current time in {city} is {}",
        local.format(TIMESTAMP_FORMAT)
    ))
}

pub struct TimeTool {
    directory: Arc<CityDirectory>,
}

impl TimeTool {
    pub fn new(directory: Arc<CityDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for TimeTool {
    fn name(&self) -> &'static str {
        "get_current_time"
    }

    fn description(&self) -> String {
        "Returns the current time in a specified city.".to_string()
    }

    fn input_schema(&self) -> Value {
        city_schema("The name of the city for which to retrieve the current time")
    }

    async fn run(&self, input: Value) -> ToolOutput {
        match serde_json::from_value::<CityInput>(input) {
            Ok(input) => lookup_time(&self.directory, &input.city).into(),
            Err(e) => ToolOutput::error(format!("Invalid input: {e}")),
        }
    }
}
