use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry},
};

use super::{ClientConfig, WeatherProvider};

/// Client for the OpenWeather 2.5 REST API (`/weather` and `/forecast`).
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).with_context(|| format!("Invalid provider base URL: {base_url}"))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url, api_key: config.api_key, http })
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{resource}", self.base_url)
    }

    /// Issue one GET for `resource`, classify the status and decode the body.
    async fn get_json<T: DeserializeOwned>(&self, resource: &str, location: &str) -> Result<T, WeatherError> {
        let res = self
            .http
            .get(self.endpoint(resource))
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(WeatherError::NetworkUnavailable)?;

        let status = res.status();
        let body = res.text().await.map_err(WeatherError::NetworkUnavailable)?;
        debug!(%status, bytes = body.len(), "OpenWeather {resource} response");

        check_status(status, location, &body)?;

        serde_json::from_str(&body).map_err(WeatherError::DecodingError)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn fetch_current(&self, location: &str) -> Result<CurrentConditions, WeatherError> {
        let parsed: OwCurrentResponse = self.get_json("weather", location).await?;
        Ok(parsed.into())
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(&self, location: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
        let parsed: OwForecastResponse = self.get_json("forecast", location).await?;
        debug!(city = %parsed.city.name, slots = parsed.list.len(), "Decoded OpenWeather forecast");

        Ok(parsed.list.into_iter().map(ForecastEntry::from).collect())
    }
}

fn check_status(status: StatusCode, location: &str, body: &str) -> Result<(), WeatherError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED => Err(WeatherError::InvalidCredentials),
        StatusCode::NOT_FOUND => Err(WeatherError::LocationNotFound(location.to_string())),
        s => Err(WeatherError::ProviderError {
            status: s.as_u16(),
            message: truncate_body(body),
        }),
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

/// Main category and description of the first reported condition.
fn first_condition(weather: Vec<OwWeather>) -> (String, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description))
        .unwrap_or_else(|| ("Unknown".to_string(), "unknown".to_string()))
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(value: OwCurrentResponse) -> Self {
        let (condition_main, condition_description) = first_condition(value.weather);
        CurrentConditions {
            location_name: value.name,
            temperature_c: value.main.temp,
            humidity_pct: value.main.humidity,
            condition_main,
            condition_description,
        }
    }
}

impl From<OwForecastEntry> for ForecastEntry {
    fn from(value: OwForecastEntry) -> Self {
        let (condition_main, condition_description) = first_condition(value.weather);
        ForecastEntry {
            timestamp: value.dt,
            temperature_c: value.main.temp,
            condition_main,
            condition_description,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
