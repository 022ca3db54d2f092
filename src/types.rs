//! Common types used throughout the rating pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for the tracked side and its opponents
pub type EntityId = String;

/// Reserved identifier under which the tracked side's rating is stored
pub const TRACKED_ENTITY: &str = "team_player";

/// Chronological position of a match.
///
/// Ordering is lexicographic: date first, then tournament number, then game
/// number within the tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchKey {
    pub date: NaiveDate,
    pub tournament_no: u32,
    pub game_no: u32,
}

impl MatchKey {
    pub fn new(date: NaiveDate, tournament_no: u32, game_no: u32) -> Self {
        Self {
            date,
            tournament_no,
            game_no,
        }
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} T{} G{}",
            self.date.format("%Y-%m-%d"),
            self.tournament_no,
            self.game_no
        )
    }
}

/// Result of a match for the tracked side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W", alias = "Win")]
    Win,
    #[serde(rename = "L", alias = "Loss")]
    Loss,
}

impl Outcome {
    /// Actual score used by the update rule: 1.0 for a win, 0.0 for a loss
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
        }
    }

    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Win)
    }

    /// The same match seen from the other side
    pub fn reversed(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "W"),
            Outcome::Loss => write!(f, "L"),
        }
    }
}

/// A single validated match from the tracked side's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(flatten)]
    pub key: MatchKey,
    pub opponent: EntityId,
    pub outcome: Outcome,
    /// True when the tracked side played at home
    pub home: bool,
    /// Display-only; never used by the rating math
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
}

impl MatchRecord {
    pub fn new(key: MatchKey, opponent: impl Into<EntityId>, outcome: Outcome, home: bool) -> Self {
        Self {
            key,
            opponent: opponent.into(),
            outcome,
            home,
            map: None,
        }
    }

    pub fn with_map(mut self, map: impl Into<String>) -> Self {
        self.map = Some(map.into());
        self
    }
}

/// How a result compared to the pre-match expectation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchClass {
    /// The tracked side was given less than even odds and won
    Upset,
    /// The tracked side was given better than even odds and lost
    FavoredLoss,
    Expected,
}

impl MatchClass {
    pub fn classify(probability: f64, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win if probability < 0.5 => MatchClass::Upset,
            Outcome::Loss if probability > 0.5 => MatchClass::FavoredLoss,
            _ => MatchClass::Expected,
        }
    }
}

impl fmt::Display for MatchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchClass::Upset => write!(f, "Upset"),
            MatchClass::FavoredLoss => write!(f, "FavoredLoss"),
            MatchClass::Expected => write!(f, "Expected"),
        }
    }
}

/// Per-match output of the rating engine, emitted in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// 0-based position in the processed match stream
    pub index: usize,
    pub key: MatchKey,
    pub opponent: EntityId,
    pub home: bool,
    pub map: Option<String>,
    /// Pre-match win probability for the tracked side
    pub probability: f64,
    pub outcome: Outcome,
    /// 1.0 for a win, 0.0 for a loss
    pub actual: f64,
    pub tracked_rating_pre: f64,
    pub tracked_rating_post: f64,
    pub opponent_rating_pre: f64,
    pub opponent_rating_post: f64,
    pub tracked_delta: f64,
    pub opponent_delta: f64,
    /// `actual - probability`; positive when the tracked side beat expectation
    pub surprise: f64,
    pub class: MatchClass,
}

impl PredictionRecord {
    pub fn is_upset(&self) -> bool {
        self.class == MatchClass::Upset
    }

    pub fn is_favored_loss(&self) -> bool {
        self.class == MatchClass::FavoredLoss
    }
}
