//! Elo rating model
//!
//! Win probabilities come from the standard logistic rating-difference curve
//! (via the skillratings crate); the update moves both sides by the same
//! K-scaled amount in opposite directions.

use crate::config::RatingConfig;
use crate::types::Outcome;
use skillratings::elo::{expected_score, EloRating};

/// Pre-match expectation and resulting update for one match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloUpdate {
    /// Win probability for the tracked side
    pub probability: f64,
    /// Amount added to the tracked side and subtracted from the opponent
    pub delta: f64,
}

/// Elo calculator bound to a validated configuration
#[derive(Debug, Clone)]
pub struct EloCalculator {
    config: RatingConfig,
}

impl EloCalculator {
    /// Create a new Elo calculator
    pub fn new(config: RatingConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Rating given to an entity the first time it is seen
    pub fn initial_rating(&self) -> f64 {
        self.config.initial_rating
    }

    /// Tracked side's rating as used for the expectation; never stored
    pub fn effective_rating(&self, stored: f64, home: bool) -> f64 {
        if home {
            stored + self.config.home_advantage
        } else {
            stored
        }
    }

    /// Probability that the tracked side beats the opponent
    pub fn win_probability(&self, tracked: f64, opponent: f64, home: bool) -> f64 {
        let effective = EloRating {
            rating: self.effective_rating(tracked, home),
        };
        let opponent = EloRating { rating: opponent };

        let (tracked_expected, _opponent_expected) = expected_score(&effective, &opponent);
        tracked_expected
    }

    /// Signed adjustment for the tracked side given the realized outcome
    pub fn delta(&self, probability: f64, outcome: Outcome) -> f64 {
        self.config.k_factor * (outcome.score() - probability)
    }

    /// Compute expectation and update for a match between stored ratings
    pub fn evaluate(&self, tracked: f64, opponent: f64, home: bool, outcome: Outcome) -> EloUpdate {
        let probability = self.win_probability(tracked, opponent, home);
        EloUpdate {
            probability,
            delta: self.delta(probability, outcome),
        }
    }
}
