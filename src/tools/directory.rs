//! City data backing the lookup tools

use chrono_tz::Tz;
use std::collections::HashMap;

/// What is known about one city
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityRecord {
    pub weather_report: Option<String>,
    pub timezone: Option<Tz>,
}

impl CityRecord {
    #[must_use]
    pub fn with_weather(mut self, report: impl Into<String>) -> Self {
        self.weather_report = Some(report.into());
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = Some(tz);
        self
    }
}

/// Case-insensitive city lookup table
#[derive(Debug, Clone, Default)]
pub struct CityDirectory {
    cities: HashMap<String, CityRecord>,
}

impl CityDirectory {
    /// An empty directory; every lookup misses
    pub fn new() -> Self {
        Self::default()
    }

    /// The single city the demo agent knows about
    pub fn builtin() -> Self {
        Self::new().with_city(
            "New York",
            CityRecord::default()
                .with_weather(
                    "The weather in New York is sunny with a temperature of 25 degrees \
                     Celsius (77 degrees Fahrenheit).",
                )
                .with_timezone(chrono_tz::America::New_York),
        )
    }

    #[must_use]
    pub fn with_city(mut self, name: &str, record: CityRecord) -> Self {
        self.cities.insert(name.to_lowercase(), record);
        self
    }

    pub fn find(&self, city: &str) -> Option<&CityRecord> {
        self.cities.get(&city.to_lowercase())
    }
}
