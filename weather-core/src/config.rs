use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{model::TemperatureUnit, provider::ClientConfig};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// unit = "celsius"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Override for the provider endpoint, mostly useful for testing.
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Default display unit.
    pub unit: Option<TemperatureUnit>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Store a new API key; blank input clears it.
    pub fn set_api_key(&mut self, api_key: &str) {
        let trimmed = api_key.trim();
        self.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Display unit, falling back to the default when unset.
    pub fn unit(&self) -> TemperatureUnit {
        self.unit.unwrap_or_default()
    }

    /// Client settings with `api_key_override` taking precedence over the file.
    ///
    /// A missing key is passed through as empty; the provider then rejects the
    /// request with 401.
    pub fn client_config(&self, api_key_override: Option<&str>) -> ClientConfig {
        let defaults = ClientConfig::default();

        let api_key = api_key_override
            .or(self.api_key.as_deref())
            .unwrap_or_default()
            .to_string();

        ClientConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            api_key,
            timeout: self.timeout_secs.map(Duration::from_secs).unwrap_or(defaults.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

    #[test]
    fn empty_config_uses_client_defaults() {
        let cfg = Config::default();
        let client = cfg.client_config(None);

        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);
        assert_eq!(client.api_key, "");
        assert!(!cfg.has_api_key());
        assert_eq!(cfg.unit(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn override_key_wins_over_file() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY");

        assert_eq!(cfg.client_config(None).api_key, "FILE_KEY");
        assert_eq!(cfg.client_config(Some("ENV_KEY")).api_key, "ENV_KEY");
    }

    #[test]
    fn blank_key_clears_existing() {
        let mut cfg = Config::default();
        cfg.set_api_key("  KEY  ");
        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));

        cfg.set_api_key("   ");
        assert!(cfg.api_key.is_none());
        assert!(!cfg.has_api_key());
    }

    #[test]
    fn file_settings_flow_into_client_config() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://localhost:9999".into()),
            timeout_secs: Some(10),
            unit: Some(TemperatureUnit::Celsius),
        };

        let client = cfg.client_config(None);
        assert_eq!(client.base_url, "http://localhost:9999");
        assert_eq!(client.timeout, Duration::from_secs(10));
        assert_eq!(cfg.unit(), TemperatureUnit::Celsius);
    }

    #[test]
    fn parses_toml() {
        let cfg: Config = toml::from_str("api_key = \"abc\"\nunit = \"celsius\"\n").unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.unit, Some(TemperatureUnit::Celsius));
        assert!(cfg.timeout_secs.is_none());
    }

    #[test]
    fn missing_file_loads_default() {
        let path = std::env::temp_dir().join("weather-core-does-not-exist").join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("weather-core-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY");
        cfg.unit = Some(TemperatureUnit::Celsius);
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);

        let _ = fs::remove_dir_all(&dir);
    }
}
