//! Brier score: mean squared error of probabilistic binary predictions

use crate::error::{AnalyticsError, Result};
use crate::types::PredictionRecord;

/// Mean of `(p - outcome)^2` over `(p, outcome)` pairs; `None` when empty
pub fn mean_squared_error<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (count, sum) = pairs
        .into_iter()
        .fold((0usize, 0.0_f64), |(count, sum), (p, y)| {
            (count + 1, sum + (p - y).powi(2))
        });

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Brier score of a prediction sequence.
///
/// 0.0 is perfect, 0.25 is a constant coin flip, 1.0 is maximally wrong.
/// An empty sequence is an error rather than a score.
pub fn brier_score(predictions: &[PredictionRecord]) -> Result<f64> {
    mean_squared_error(predictions.iter().map(|p| (p.probability, p.actual)))
        .ok_or_else(|| AnalyticsError::empty_input("calibration analyzer").into())
}
