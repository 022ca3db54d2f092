//! Sequential rating engine
//!
//! Folds a chronologically ordered match stream into per-match predictions.
//! Each update depends on the rating state left by the previous match, so
//! records are processed strictly one at a time in input order.

use crate::config::RatingConfig;
use crate::error::{AnalyticsError, Result};
use crate::rating::elo::EloCalculator;
use crate::rating::storage::{RatingEntry, RatingState};
use crate::types::{MatchClass, MatchKey, MatchRecord, PredictionRecord, TRACKED_ENTITY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Complete output of a rating run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRun {
    /// Configuration actually used
    pub config: RatingConfig,
    /// Final ratings, highest first
    pub final_ratings: Vec<RatingEntry>,
    /// One record per processed match, in input order
    pub predictions: Vec<PredictionRecord>,
}

impl RatingRun {
    /// Final rating of the tracked side
    pub fn tracked_rating(&self) -> Option<f64> {
        self.rating_of(TRACKED_ENTITY)
    }

    pub fn rating_of(&self, entity_id: &str) -> Option<f64> {
        self.final_ratings
            .iter()
            .find(|entry| entry.entity_id == entity_id)
            .map(|entry| entry.rating)
    }
}

/// Stateful Elo engine for the tracked side and its opponents
#[derive(Debug, Clone)]
pub struct RatingEngine {
    calculator: EloCalculator,
    state: RatingState,
    predictions: Vec<PredictionRecord>,
    last_key: Option<MatchKey>,
    halted: Option<AnalyticsError>,
}

impl RatingEngine {
    /// Create an engine with an empty rating state
    pub fn new(config: RatingConfig) -> Result<Self> {
        let calculator = EloCalculator::new(config)?;
        let state = RatingState::new(calculator.initial_rating());

        Ok(Self {
            calculator,
            state,
            predictions: Vec::new(),
            last_key: None,
            halted: None,
        })
    }

    /// Process a full match stream and return the final snapshot.
    ///
    /// Fails on an empty stream and on the first invalid or out-of-order
    /// record; no partial output is returned in either case.
    pub fn run(config: RatingConfig, records: &[MatchRecord]) -> Result<RatingRun> {
        if records.is_empty() {
            return Err(AnalyticsError::empty_input("rating engine").into());
        }

        let mut engine = Self::new(config)?;
        for record in records {
            engine.process(record)?;
        }

        let run = engine.finish();
        info!(
            "Rating run complete: {} matches, {} entities, tracked rating {:.1}",
            run.predictions.len(),
            run.final_ratings.len(),
            run.tracked_rating().unwrap_or(config.initial_rating)
        );
        Ok(run)
    }

    pub fn config(&self) -> &RatingConfig {
        self.calculator.config()
    }

    pub fn ratings(&self) -> &RatingState {
        &self.state
    }

    pub fn predictions(&self) -> &[PredictionRecord] {
        &self.predictions
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Process the next match in chronological order
    pub fn process(&mut self, record: &MatchRecord) -> Result<&PredictionRecord> {
        if let Some(err) = &self.halted {
            return Err(err.clone().into());
        }

        let index = self.predictions.len();
        if let Err(err) = self.check(index, record) {
            warn!("Rejecting match {}: {}", index, err);
            self.halted = Some(err.clone());
            return Err(err.into());
        }

        // Pre-match snapshot; seeds unseen entities
        let tracked_pre = self.state.rating_or_seed(TRACKED_ENTITY);
        let opponent_pre = self.state.rating_or_seed(&record.opponent);

        let update = self
            .calculator
            .evaluate(tracked_pre, opponent_pre, record.home, record.outcome);

        let tracked_post = self
            .state
            .apply(TRACKED_ENTITY, update.delta, record.outcome)?;
        let opponent_post =
            self.state
                .apply(&record.opponent, -update.delta, record.outcome.reversed())?;

        let actual = record.outcome.score();
        let prediction = PredictionRecord {
            index,
            key: record.key,
            opponent: record.opponent.clone(),
            home: record.home,
            map: record.map.clone(),
            probability: update.probability,
            outcome: record.outcome,
            actual,
            tracked_rating_pre: tracked_pre,
            tracked_rating_post: tracked_post,
            opponent_rating_pre: opponent_pre,
            opponent_rating_post: opponent_post,
            tracked_delta: update.delta,
            opponent_delta: -update.delta,
            surprise: actual - update.probability,
            class: MatchClass::classify(update.probability, record.outcome),
        };

        debug!(
            "Match {} ({}) vs {}: p={:.3} outcome={} delta={:+.2} class={}",
            index,
            record.key,
            record.opponent,
            prediction.probability,
            record.outcome,
            prediction.tracked_delta,
            prediction.class
        );

        self.last_key = Some(record.key);
        self.predictions.push(prediction);
        Ok(&self.predictions[index])
    }

    /// Consume the engine and return the final snapshot and predictions
    pub fn finish(self) -> RatingRun {
        RatingRun {
            config: *self.calculator.config(),
            final_ratings: self.state.snapshot(),
            predictions: self.predictions,
        }
    }

    fn check(&self, index: usize, record: &MatchRecord) -> std::result::Result<(), AnalyticsError> {
        if let Some(previous) = self.last_key {
            if record.key < previous {
                return Err(AnalyticsError::OutOfOrderInput {
                    index,
                    previous,
                    current: record.key,
                });
            }
        }

        if record.opponent.is_empty() {
            return Err(AnalyticsError::InvalidRecord {
                index,
                reason: "opponent identifier is empty".to_string(),
            });
        }

        if record.opponent == TRACKED_ENTITY {
            return Err(AnalyticsError::InvalidRecord {
                index,
                reason: format!("opponent uses the reserved identifier '{}'", TRACKED_ENTITY),
            });
        }

        Ok(())
    }
}
