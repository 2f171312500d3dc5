use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use tracing::{info, warn};
use weather_core::{Config, Location, OpenWeatherClient, TemperatureUnit, fetch_report};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// OpenWeather API key; takes precedence over the configured one.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default temperature unit.
    Configure,

    /// Show current weather and the 5-day forecast for a location.
    Show {
        /// City name, optionally qualified: "Paris,FR" or "Austin,TX,US".
        location: Location,

        /// Display unit: fahrenheit (f) or celsius (c).
        #[arg(short, long)]
        unit: Option<TemperatureUnit>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, unit } => show(location, unit, self.api_key.as_deref()).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let help = if config.has_api_key() {
        "Leave empty to keep the current key"
    } else {
        "Get one at https://openweathermap.org/api"
    };

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(help)
        .prompt()?;

    if !api_key.trim().is_empty() {
        config.set_api_key(&api_key);
    }

    let units = TemperatureUnit::all().to_vec();
    let current = units.iter().position(|u| *u == config.unit()).unwrap_or(0);
    let unit = Select::new("Default temperature unit:", units)
        .with_starting_cursor(current)
        .prompt()?;
    config.unit = Some(unit);

    let path = config.save()?;
    info!(path = %path.display(), "Saved configuration");
    println!("Configuration saved to {}", path.display());

    Ok(())
}

async fn show(
    location: Location,
    unit: Option<TemperatureUnit>,
    api_key: Option<&str>,
) -> anyhow::Result<()> {
    let config = Config::load()?;

    if api_key.is_none() && !config.has_api_key() {
        warn!("No API key configured. Run `weather configure` or set OPENWEATHER_API_KEY.");
    }

    let unit = unit.unwrap_or_else(|| config.unit());
    let client = OpenWeatherClient::new(config.client_config(api_key))?;

    let report = fetch_report(&client, location.as_str(), &Local::now())
        .await
        .map_err(|err| {
            let message = render::error_message(&err);
            anyhow::Error::new(err).context(message)
        })?;

    println!("{}", render::report(&report, unit));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_unit() {
        let cli = Cli::try_parse_from(["weather", "show", "Paris,FR", "--unit", "c"]).unwrap();

        match cli.command {
            Command::Show { location, unit } => {
                assert_eq!(location.as_str(), "Paris,FR");
                assert_eq!(unit, Some(TemperatureUnit::Celsius));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_blank_location() {
        let err = Cli::try_parse_from(["weather", "show", "   "]).unwrap_err();
        assert!(err.to_string().contains("Please enter a city name"));
    }

    #[test]
    fn counts_verbosity() {
        let cli = Cli::try_parse_from(["weather", "-vv", "configure"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Configure));
    }

    #[test]
    fn api_key_flag_is_global() {
        let cli = Cli::try_parse_from(["weather", "show", "Oslo", "--api-key", "KEY"]).unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("KEY"));
    }
}
