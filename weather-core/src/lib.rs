//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and its typed error taxonomy
//! - Aggregation of 3-hour forecast slots into daily summaries
//! - Shared domain models
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::WeatherError;
pub use forecast::{MAX_FORECAST_DAYS, aggregate};
pub use model::{
    CurrentConditions, DailyForecast, ForecastEntry, Location, TemperatureUnit, WeatherReport,
};
pub use provider::{ClientConfig, WeatherProvider, fetch_report, openweather::OpenWeatherClient};
