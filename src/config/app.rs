//! Main application configuration
//!
//! This module defines the top-level configuration for the match-analytics
//! pipeline, including environment variable loading, TOML loading and
//! validation.

use crate::config::{CalibrationConfig, RatingConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub calibration: CalibrationConfig,
    pub report: ReportSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Settings for the report handed to downstream consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Size of the "recent matches" window
    pub recent_matches: usize,
}

/// Command-line overrides layered on top of the env or file configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    /// Forces the `debug` log level, winning over `log_level`
    pub debug: bool,
    pub k_factor: Option<f64>,
    pub home_advantage: Option<f64>,
    pub initial_rating: Option<f64>,
    pub bin_width: Option<f64>,
    pub recent_matches: Option<usize>,
}

impl ConfigOverrides {
    /// Overwrite every field of `config` that has an override set
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(log_level) = &self.log_level {
            config.service.log_level = log_level.clone();
        }
        if self.debug {
            config.service.log_level = "debug".to_string();
        }
        if let Some(k_factor) = self.k_factor {
            config.rating.k_factor = k_factor;
        }
        if let Some(home_advantage) = self.home_advantage {
            config.rating.home_advantage = home_advantage;
        }
        if let Some(initial_rating) = self.initial_rating {
            config.rating.initial_rating = initial_rating;
        }
        if let Some(bin_width) = self.bin_width {
            config.calibration.bin_width = bin_width;
        }
        if let Some(recent) = self.recent_matches {
            config.report.recent_matches = recent;
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "match-analytics".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { recent_matches: 10 }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Rating settings
        if let Ok(k) = env::var("RATING_K_FACTOR") {
            config.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_K_FACTOR value: {}", k))?;
        }
        if let Ok(home_adv) = env::var("RATING_HOME_ADVANTAGE") {
            config.rating.home_advantage = home_adv
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_HOME_ADVANTAGE value: {}", home_adv))?;
        }
        if let Ok(initial) = env::var("RATING_INITIAL") {
            config.rating.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_INITIAL value: {}", initial))?;
        }

        // Calibration settings
        if let Ok(width) = env::var("CALIBRATION_BIN_WIDTH") {
            config.calibration.bin_width = width
                .parse()
                .map_err(|_| anyhow!("Invalid CALIBRATION_BIN_WIDTH value: {}", width))?;
        }

        // Report settings
        if let Ok(recent) = env::var("REPORT_RECENT_MATCHES") {
            config.report.recent_matches = recent
                .parse()
                .map_err(|_| anyhow!("Invalid REPORT_RECENT_MATCHES value: {}", recent))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the environment, then apply
    /// `overrides` and validate the merged result
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };

        overrides.apply(&mut config);
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys fall back to defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    config.rating.validate()?;
    config.calibration.validate()?;

    if config.report.recent_matches == 0 {
        return Err(anyhow!("Recent match window must be greater than 0"));
    }

    Ok(())
}
