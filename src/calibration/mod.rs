//! Calibration analysis of pre-match win probabilities
//!
//! A pure reduction over a finished prediction sequence: the Brier score plus
//! a reliability table. Any subsequence can be analyzed on its own without
//! replaying the rating engine.

pub mod brier;
pub mod recent;
pub mod reliability;

pub use brier::brier_score;
pub use recent::{recent, RecentForm};
pub use reliability::{reliability_table, CalibrationBin};

use crate::config::CalibrationConfig;
use crate::error::Result;
use crate::types::PredictionRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Brier score and reliability table for one prediction sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSummary {
    pub sample_count: usize,
    /// `None` when there were no predictions to score
    pub brier_score: Option<f64>,
    /// Non-empty bins in ascending probability order
    pub bins: Vec<CalibrationBin>,
}

impl CalibrationSummary {
    pub fn is_undefined(&self) -> bool {
        self.brier_score.is_none()
    }
}

/// Analyzer bound to a validated binning configuration
#[derive(Debug, Clone)]
pub struct CalibrationAnalyzer {
    config: CalibrationConfig,
}

impl CalibrationAnalyzer {
    pub fn new(config: CalibrationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Brier score; fails with `EmptyInput` for an empty sequence
    pub fn brier_score(&self, predictions: &[PredictionRecord]) -> Result<f64> {
        brier_score(predictions)
    }

    pub fn reliability_table(&self, predictions: &[PredictionRecord]) -> Vec<CalibrationBin> {
        reliability_table(predictions, &self.config)
    }

    /// Full summary; an empty sequence yields an undefined score and no bins
    pub fn analyze(&self, predictions: &[PredictionRecord]) -> CalibrationSummary {
        let brier_score = brier_score(predictions).ok();
        let bins = self.reliability_table(predictions);

        debug!(
            "Calibration over {} predictions: brier={:?}, {} non-empty bins",
            predictions.len(),
            brier_score,
            bins.len()
        );

        CalibrationSummary {
            sample_count: predictions.len(),
            brier_score,
            bins,
        }
    }
}
