//! End-to-end analytics run
//!
//! Runs the rating engine over a match stream, then the calibration analyzer
//! over the whole prediction sequence and over the recent-matches window, and
//! bundles everything a reporting layer needs into one serializable value.

use crate::calibration::{recent, CalibrationAnalyzer, CalibrationSummary, RecentForm};
use crate::config::AppConfig;
use crate::error::Result;
use crate::rating::{RatingEngine, RatingEntry};
use crate::types::{MatchRecord, PredictionRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configuration values actually used, echoed for audit and display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfigEcho {
    pub k_factor: f64,
    pub home_advantage: f64,
    pub initial_rating: f64,
    pub bin_width: f64,
}

impl From<&AppConfig> for ConfigEcho {
    fn from(config: &AppConfig) -> Self {
        Self {
            k_factor: config.rating.k_factor,
            home_advantage: config.rating.home_advantage,
            initial_rating: config.rating.initial_rating,
            bin_width: config.calibration.bin_width,
        }
    }
}

/// Everything the reporting collaborator consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub config: ConfigEcho,
    pub final_ratings: Vec<RatingEntry>,
    pub predictions: Vec<PredictionRecord>,
    pub recent: Vec<PredictionRecord>,
    pub recent_form: Option<RecentForm>,
    pub calibration: CalibrationSummary,
    pub recent_calibration: CalibrationSummary,
}

impl AnalyticsReport {
    /// Run the full pipeline over an ordered match stream
    pub fn build(config: &AppConfig, records: &[MatchRecord]) -> Result<Self> {
        let analyzer = CalibrationAnalyzer::new(config.calibration)?;
        let run = RatingEngine::run(config.rating, records)?;

        let calibration = analyzer.analyze(&run.predictions);
        let recent_window = recent(&run.predictions, config.report.recent_matches);
        let recent_calibration = analyzer.analyze(recent_window);
        let recent_form = RecentForm::from_predictions(recent_window);
        let recent = recent_window.to_vec();

        info!(
            "Report built: {} matches, brier={}",
            run.predictions.len(),
            calibration
                .brier_score
                .map(|b| format!("{:.4}", b))
                .unwrap_or_else(|| "undefined".to_string())
        );

        Ok(Self {
            config: ConfigEcho::from(config),
            final_ratings: run.final_ratings,
            predictions: run.predictions,
            recent,
            recent_form,
            calibration,
            recent_calibration,
        })
    }

    /// Final rating of the tracked side
    pub fn tracked_rating(&self) -> Option<f64> {
        self.final_ratings
            .iter()
            .find(|entry| entry.entity_id == crate::types::TRACKED_ENTITY)
            .map(|entry| entry.rating)
    }
}
