//! Recent-form summary over the tail of the prediction stream

use crate::types::PredictionRecord;
use serde::{Deserialize, Serialize};

/// Results versus expectation over a window of matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentForm {
    pub matches: usize,
    pub wins: usize,
    pub losses: usize,
    pub average_probability: f64,
    /// Sum of pre-match win probabilities
    pub expected_wins: f64,
    /// Actual wins minus expected wins
    pub over_under: f64,
    pub upsets: usize,
    pub favored_losses: usize,
}

impl RecentForm {
    /// Summarize a window of predictions; `None` when the window is empty
    pub fn from_predictions(predictions: &[PredictionRecord]) -> Option<Self> {
        if predictions.is_empty() {
            return None;
        }

        let matches = predictions.len();
        let wins = predictions.iter().filter(|p| p.outcome.is_win()).count();
        let expected_wins: f64 = predictions.iter().map(|p| p.probability).sum();

        Some(Self {
            matches,
            wins,
            losses: matches - wins,
            average_probability: expected_wins / matches as f64,
            expected_wins,
            over_under: wins as f64 - expected_wins,
            upsets: predictions.iter().filter(|p| p.is_upset()).count(),
            favored_losses: predictions.iter().filter(|p| p.is_favored_loss()).count(),
        })
    }
}

/// The last `n` predictions (all of them when fewer than `n` exist)
pub fn recent(predictions: &[PredictionRecord], n: usize) -> &[PredictionRecord] {
    &predictions[predictions.len().saturating_sub(n)..]
}
