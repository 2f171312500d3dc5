use crate::{
    error::WeatherError,
    forecast::aggregate,
    model::{CurrentConditions, ForecastEntry, WeatherReport},
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone};
use std::{fmt::Debug, time::Duration};
use tracing::{debug, instrument};

pub mod openweather;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Connection settings for a provider client. Read-only once the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A source of current conditions and raw 3-hour forecasts.
///
/// Each call issues exactly one request and never retries.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, location: &str) -> Result<CurrentConditions, WeatherError>;

    async fn fetch_forecast(&self, location: &str) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// Fetch current conditions and the forecast concurrently, then aggregate the
/// forecast into daily summaries using the calendar of `now`.
///
/// Both results are discarded if either request fails; the first error wins.
#[instrument(skip(provider, now))]
pub async fn fetch_report<P, Tz>(
    provider: &P,
    location: &str,
    now: &DateTime<Tz>,
) -> Result<WeatherReport, WeatherError>
where
    P: WeatherProvider + ?Sized,
    Tz: TimeZone,
{
    let (current, entries) =
        tokio::try_join!(provider.fetch_current(location), provider.fetch_forecast(location))?;

    let daily = aggregate(&entries, now);
    debug!(entries = entries.len(), days = daily.len(), "Aggregated forecast");

    Ok(WeatherReport { current, daily })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};

    #[derive(Debug)]
    struct FakeProvider {
        fail_forecast: bool,
        base: DateTime<Utc>,
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn fetch_current(&self, location: &str) -> Result<CurrentConditions, WeatherError> {
            Ok(CurrentConditions {
                location_name: location.to_string(),
                temperature_c: 21.0,
                humidity_pct: 40,
                condition_main: "Clear".into(),
                condition_description: "clear sky".into(),
            })
        }

        async fn fetch_forecast(&self, location: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
            if self.fail_forecast {
                return Err(WeatherError::LocationNotFound(location.to_string()));
            }

            Ok((0..8)
                .map(|i| ForecastEntry {
                    timestamp: (self.base + ChronoDuration::hours(3 * i)).timestamp(),
                    temperature_c: i as f64,
                    condition_main: "Clouds".into(),
                    condition_description: "few clouds".into(),
                })
                .collect())
        }
    }

    #[test]
    fn client_config_defaults() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert!(cfg.api_key.is_empty());
    }

    #[tokio::test]
    async fn report_combines_current_and_daily() {
        let now = Utc.with_ymd_and_hms(2024, 6, 16, 10, 0, 0).unwrap();
        let provider = FakeProvider {
            fail_forecast: false,
            base: Utc.with_ymd_and_hms(2024, 6, 17, 0, 0, 0).unwrap(),
        };

        let report = fetch_report(&provider, "Paris,FR", &now).await.expect("report should succeed");

        assert_eq!(report.current.location_name, "Paris,FR");
        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.daily[0].high_c, 7.0);
        assert_eq!(report.daily[0].low_c, 0.0);
    }

    #[tokio::test]
    async fn report_discards_current_when_forecast_fails() {
        let now = Utc::now();
        let provider = FakeProvider { fail_forecast: true, base: now };

        let err = fetch_report(&provider, "Atlantis", &now).await.unwrap_err();

        assert!(matches!(err, WeatherError::LocationNotFound(ref l) if l == "Atlantis"));
    }

    #[tokio::test]
    async fn report_works_through_trait_object() {
        let now = Utc::now();
        let provider: Box<dyn WeatherProvider> =
            Box::new(FakeProvider { fail_forecast: false, base: now - ChronoDuration::days(3) });

        let report = fetch_report(provider.as_ref(), "Oslo", &now).await.unwrap();

        assert!(report.daily.is_empty());
    }
}
