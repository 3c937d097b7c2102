//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calculate::DecayFactor;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Stats source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// statsapi base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Roster index endpoint
    #[serde(default = "default_roster_url")]
    pub roster_url: String,

    /// Delay between per-player requests, in milliseconds
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,

    /// How long cached responses stay fresh, in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_api_base() -> String {
    "https://statsapi.mlb.com/api/v1".to_string()
}

fn default_roster_url() -> String {
    "https://bdfed.stitch.mlbinfra.com/bdfed/stats/player".to_string()
}

fn default_request_delay() -> u64 {
    500
}

fn default_cache_ttl() -> u64 {
    3600
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            roster_url: default_roster_url(),
            request_delay_ms: default_request_delay(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Team name or numeric MLB team ID
    #[serde(default = "default_team")]
    pub team: String,

    /// Season year
    #[serde(default = "default_season")]
    pub season: String,

    /// Decay factor for the weighted rate, in (0, 1]
    #[serde(default = "default_decay_factor")]
    pub decay_factor: f64,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub source: SourceConfig,
}

fn default_team() -> String {
    "Rays".to_string()
}

fn default_season() -> String {
    "2023".to_string()
}

fn default_decay_factor() -> f64 {
    0.95
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            team: default_team(),
            season: default_season(),
            decay_factor: default_decay_factor(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            source: SourceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.decay()?;

        if self.team.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Team must not be empty".to_string(),
            ));
        }

        if self.season.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Season must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The validated decay factor.
    pub fn decay(&self) -> Result<DecayFactor, ConfigError> {
        DecayFactor::new(self.decay_factor)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.team, "Rays");
        assert_eq!(config.season, "2023");
        assert_eq!(config.decay_factor, 0.95);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_source_config_default() {
        let source = SourceConfig::default();

        assert!(source.api_base.contains("statsapi.mlb.com"));
        assert_eq!(source.request_delay_ms, 500);
        assert_eq!(source.cache_ttl_secs, 3600);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_decay() {
        let mut config = AppConfig::default();
        config.decay_factor = 1.5;
        assert!(config.validate().is_err());

        config.decay_factor = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_team() {
        let mut config = AppConfig::default();
        config.team = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_partial_toml() {
        let config: AppConfig = toml::from_str("decay_factor = 0.98").unwrap();

        assert_eq!(config.decay_factor, 0.98);
        assert_eq!(config.team, "Rays"); // defaulted
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.team, parsed.team);
        assert_eq!(config.source.api_base, parsed.source.api_base);
    }
}
