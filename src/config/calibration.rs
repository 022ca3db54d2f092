//! Calibration analysis configuration

use crate::error::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};

const BIN_WIDTH_TOLERANCE: f64 = 1e-9;

/// Finest supported binning (bin width 0.001)
pub const MAX_BIN_COUNT: usize = 1000;

/// Reliability binning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Width of each equal-width probability bin; must divide 1 evenly
    pub bin_width: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self { bin_width: 0.1 }
    }
}

impl CalibrationConfig {
    pub fn with_bin_count(bins: usize) -> Self {
        Self {
            bin_width: 1.0 / bins.max(1) as f64,
        }
    }

    /// Number of bins covering [0, 1]
    pub fn bin_count(&self) -> usize {
        (1.0 / self.bin_width).round().max(1.0) as usize
    }

    pub fn validate(&self) -> Result<()> {
        if !self.bin_width.is_finite() || self.bin_width <= 0.0 || self.bin_width > 1.0 {
            return Err(AnalyticsError::configuration(format!(
                "Bin width must be in (0, 1], got {}",
                self.bin_width
            ))
            .into());
        }

        let bins = 1.0 / self.bin_width;
        if bins.round() > MAX_BIN_COUNT as f64 {
            return Err(AnalyticsError::configuration(format!(
                "Bin width {} yields more than {} bins",
                self.bin_width, MAX_BIN_COUNT
            ))
            .into());
        }

        if (bins - bins.round()).abs() > BIN_WIDTH_TOLERANCE {
            return Err(AnalyticsError::configuration(format!(
                "Bin width {} does not divide [0, 1] into equal bins",
                self.bin_width
            ))
            .into());
        }

        Ok(())
    }
}
