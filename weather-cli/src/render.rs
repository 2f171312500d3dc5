//! Human-friendly text output.

use std::fmt::Write;

use weather_core::{CurrentConditions, DailyForecast, TemperatureUnit, WeatherError, WeatherReport};

pub fn condition_icon(condition_main: &str) -> &'static str {
    match condition_main.to_lowercase().as_str() {
        "clear" => "☀️",
        "clouds" => "☁️",
        "rain" => "🌧️",
        "snow" => "🌨️",
        "thunderstorm" => "⛈️",
        "drizzle" => "🌦️",
        "mist" | "fog" => "🌫️",
        _ => "🌤️",
    }
}

/// Upper-case the first letter of every word: "light rain" -> "Light Rain".
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn error_message(err: &WeatherError) -> String {
    match err {
        WeatherError::InvalidCredentials => {
            "Invalid API key. Run `weather configure` or set OPENWEATHER_API_KEY".to_string()
        }
        WeatherError::LocationNotFound(_) => "City not found. Try format like Paris,FR".to_string(),
        WeatherError::ProviderError { status, .. } => {
            format!("Server error (HTTP {status}). Try again later")
        }
        WeatherError::DecodingError(_) => "Data parsing error".to_string(),
        WeatherError::NetworkUnavailable(_) => "No internet connection".to_string(),
    }
}

pub fn current_card(current: &CurrentConditions, unit: TemperatureUnit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📍 {}", current.location_name);
    let _ = writeln!(
        out,
        "   {}  {} {}",
        unit.format(current.temperature_c),
        condition_icon(&current.condition_main),
        capitalize_words(&current.condition_description),
    );
    let _ = write!(out, "   Humidity {}%  ·  {}", current.humidity_pct, current.condition_main);
    out
}

pub fn forecast_rows(daily: &[DailyForecast], unit: TemperatureUnit) -> String {
    let mut out = String::from("📅 5-Day Forecast");
    for day in daily {
        let _ = write!(
            out,
            "\n   {:<4} {}  {:<24} {:>6} {:>6}",
            day.date.format("%a").to_string(),
            condition_icon(&day.condition_main),
            capitalize_words(&day.condition_description),
            unit.format(day.low_c),
            unit.format(day.high_c),
        );
    }
    out
}

pub fn report(report: &WeatherReport, unit: TemperatureUnit) -> String {
    let mut out = current_card(&report.current, unit);
    if !report.daily.is_empty() {
        out.push_str("\n\n");
        out.push_str(&forecast_rows(&report.daily, unit));
    }
    out
}
