//! Rating engine configuration

use crate::error::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};

/// Parameters of the sequential Elo update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Step size of each rating adjustment
    pub k_factor: f64,
    /// Rating points added to the tracked side's effective rating at home
    pub home_advantage: f64,
    /// Rating assigned to an entity on first sight
    pub initial_rating: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: 20.0,
            home_advantage: 0.0,
            initial_rating: 1500.0,
        }
    }
}

impl RatingConfig {
    pub fn new(k_factor: f64, home_advantage: f64) -> Self {
        Self {
            k_factor,
            home_advantage,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(AnalyticsError::configuration(format!(
                "K-factor must be a positive number, got {}",
                self.k_factor
            ))
            .into());
        }

        if !self.home_advantage.is_finite() {
            return Err(AnalyticsError::configuration("Home advantage must be finite").into());
        }

        if !self.initial_rating.is_finite() {
            return Err(AnalyticsError::configuration("Initial rating must be finite").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_config_default() {
        let config = RatingConfig::default();
        assert_eq!(config.k_factor, 20.0);
        assert_eq!(config.home_advantage, 0.0);
        assert_eq!(config.initial_rating, 1500.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rating_config_validation() {
        let mut config = RatingConfig::default();

        config.k_factor = 0.0;
        assert!(config.validate().is_err());

        config.k_factor = -5.0;
        assert!(config.validate().is_err());

        config = RatingConfig::default();
        config.k_factor = f64::NAN;
        assert!(config.validate().is_err());

        // Negative home advantage is allowed (e.g. a hostile home crowd)
        config = RatingConfig::new(32.0, -25.0);
        assert!(config.validate().is_ok());

        config.home_advantage = f64::INFINITY;
        assert!(config.validate().is_err());
    }
}
