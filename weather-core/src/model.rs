use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Snapshot of the weather at a location right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    /// Coarse category reported by the provider, e.g. "Clear" or "Rain".
    pub condition_main: String,
    pub condition_description: String,
}

/// One raw 3-hour forecast slot as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: i64,
    pub temperature_c: f64,
    pub condition_main: String,
    pub condition_description: String,
}

/// Forecast for a single calendar day, reduced from the 3-hour slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub high_c: f64,
    pub low_c: f64,
    pub condition_main: String,
    pub condition_description: String,
}

/// Current conditions together with the upcoming daily forecasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
}

/// Display unit for temperatures. Stored values are always Celsius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Celsius => celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        }
    }

    /// Whole degrees (truncated toward zero) followed by the unit symbol.
    pub fn format(self, celsius: f64) -> String {
        format!("{}{}", self.convert(celsius) as i64, self.symbol())
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius]
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureUnit::Fahrenheit => f.write_str("fahrenheit"),
            TemperatureUnit::Celsius => f.write_str("celsius"),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: fahrenheit (f), celsius (c)."
            )),
        }
    }
}

/// A non-empty, trimmed location query such as "Paris,FR".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(String);

impl Location {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Location {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(anyhow::anyhow!("Please enter a city name"));
        }
        Ok(Location(trimmed.to_string()))
    }
}
