//! Reliability (calibration) table over equal-width probability bins

use crate::config::CalibrationConfig;
use crate::types::PredictionRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate for one non-empty probability bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBin {
    /// Inclusive lower bound
    pub lower: f64,
    /// Exclusive upper bound (inclusive for the top bin)
    pub upper: f64,
    pub count: usize,
    pub mean_predicted: f64,
    pub empirical_rate: f64,
    /// `empirical_rate - mean_predicted`; positive means under-confident
    pub gap: f64,
}

impl CalibrationBin {
    pub fn contains(&self, probability: f64) -> bool {
        probability >= self.lower && (probability < self.upper || self.upper >= 1.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct BinAccumulator {
    count: usize,
    sum_predicted: f64,
    sum_actual: f64,
}

impl BinAccumulator {
    fn add_sample(&mut self, predicted: f64, actual: f64) {
        self.count += 1;
        self.sum_predicted += predicted;
        self.sum_actual += actual;
    }
}

/// Bin index for `probability` among `bins` equal-width bins; 1.0 lands in the top bin
pub fn bin_index(probability: f64, bins: usize) -> usize {
    let scaled = (probability.clamp(0.0, 1.0) * bins as f64).floor() as usize;
    scaled.min(bins.saturating_sub(1))
}

/// Build the reliability table from `(p, outcome)` pairs
pub fn reliability_from_pairs<I>(pairs: I, config: &CalibrationConfig) -> Vec<CalibrationBin>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let bins = config.bin_count();
    // Only bins that receive a sample get an accumulator
    let mut accumulators: BTreeMap<usize, BinAccumulator> = BTreeMap::new();

    for (predicted, actual) in pairs {
        accumulators
            .entry(bin_index(predicted, bins))
            .or_default()
            .add_sample(predicted, actual);
    }

    accumulators
        .into_iter()
        .map(|(i, acc)| {
            let n = acc.count as f64;
            let mean_predicted = acc.sum_predicted / n;
            let empirical_rate = acc.sum_actual / n;
            CalibrationBin {
                lower: i as f64 / bins as f64,
                upper: (i + 1) as f64 / bins as f64,
                count: acc.count,
                mean_predicted,
                empirical_rate,
                gap: empirical_rate - mean_predicted,
            }
        })
        .collect()
}

/// Reliability table for a prediction sequence; empty bins are omitted
pub fn reliability_table(
    predictions: &[PredictionRecord],
    config: &CalibrationConfig,
) -> Vec<CalibrationBin> {
    reliability_from_pairs(
        predictions.iter().map(|p| (p.probability, p.actual)),
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bin_index_boundaries() {
        assert_eq!(bin_index(0.0, 10), 0);
        assert_eq!(bin_index(0.0999, 10), 0);
        assert_eq!(bin_index(0.1, 10), 1);
        assert_eq!(bin_index(0.7, 10), 7);
        assert_eq!(bin_index(0.9999, 10), 9);
        assert_eq!(bin_index(1.0, 10), 9);
        assert_eq!(bin_index(1.0, 1), 0);
    }

    #[test]
    fn test_shape_and_gap() {
        let pairs = vec![
            (0.15, 1.0),
            (0.25, 0.0),
            (0.55, 1.0),
            (0.65, 0.0),
            (0.85, 1.0),
            (0.95, 0.0),
        ];
        let table = reliability_from_pairs(pairs, &CalibrationConfig::with_bin_count(5));

        let total: usize = table.iter().map(|bin| bin.count).sum();
        assert_eq!(total, 6);
        assert_eq!(table.len(), 5);

        for bin in &table {
            assert!((0.0..=1.0).contains(&bin.mean_predicted));
            assert!(bin.contains(bin.mean_predicted));
            assert_relative_eq!(bin.gap, bin.empirical_rate - bin.mean_predicted);
        }

        let top = table.last().unwrap();
        assert_eq!(top.count, 2);
        assert_relative_eq!(top.lower, 0.8);
        assert_relative_eq!(top.upper, 1.0);
        assert_relative_eq!(top.mean_predicted, 0.9, epsilon = 1e-12);
        assert_relative_eq!(top.empirical_rate, 0.5);
    }

    #[test]
    fn test_empty_bins_omitted() {
        let table =
            reliability_from_pairs(vec![(0.05, 0.0), (1.0, 1.0)], &CalibrationConfig::default());
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].lower, 0.0);
        assert_relative_eq!(table[1].lower, 0.9);
        assert_eq!(table[1].count, 1);

        assert!(reliability_from_pairs(Vec::new(), &CalibrationConfig::default()).is_empty());
    }

    #[test]
    fn test_under_confident_bin() {
        let pairs = vec![(0.7, 1.0), (0.72, 1.0), (0.75, 1.0), (0.79, 1.0)];
        let table = reliability_from_pairs(pairs, &CalibrationConfig::default());

        assert_eq!(table.len(), 1);
        let bin = &table[0];
        assert_relative_eq!(bin.lower, 0.7);
        assert_relative_eq!(bin.upper, 0.8);
        assert_eq!(bin.empirical_rate, 1.0);
        assert_relative_eq!(bin.mean_predicted, 0.74, epsilon = 1e-12);
        assert_relative_eq!(bin.gap, 1.0 - 0.74, epsilon = 1e-12);
        assert!(bin.gap > 0.0);
    }

    #[test]
    fn test_fine_binning_stays_sparse() {
        // Far above the validated cap; only occupied bins are materialized
        let config = CalibrationConfig::with_bin_count(1_000_000_000_000);
        let table = reliability_from_pairs(vec![(0.5, 1.0), (0.25, 0.0)], &config);

        assert_eq!(table.len(), 2);
        assert!(table[0].lower < table[1].lower);
        assert!(table[0].contains(0.25));
        assert!(table[1].contains(0.5));
        assert_eq!(table[1].empirical_rate, 1.0);
    }
}
