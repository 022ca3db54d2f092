//! Test fixtures for building match streams and prediction sets

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use match_analytics::types::{
    MatchClass, MatchKey, MatchRecord, Outcome, PredictionRecord,
};

/// Builds a chronologically ordered match stream, two games per day
#[derive(Debug, Default)]
pub struct MatchStreamBuilder {
    records: Vec<MatchRecord>,
}

impl MatchStreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_key(&self) -> MatchKey {
        let n = self.records.len() as i64;
        let start = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        MatchKey::new(start + Duration::days(n / 2), 1, (n % 2) as u32 + 1)
    }

    pub fn play(mut self, opponent: &str, outcome: Outcome, home: bool) -> Self {
        let key = self.next_key();
        self.records
            .push(MatchRecord::new(key, opponent, outcome, home));
        self
    }

    pub fn win(self, opponent: &str) -> Self {
        self.play(opponent, Outcome::Win, false)
    }

    pub fn loss(self, opponent: &str) -> Self {
        self.play(opponent, Outcome::Loss, false)
    }

    pub fn build(self) -> Vec<MatchRecord> {
        self.records
    }
}

/// Assign fresh, strictly increasing keys to `(opponent, outcome, home)` triples
pub fn stream_from(matches: &[(&str, Outcome, bool)]) -> Vec<MatchRecord> {
    matches
        .iter()
        .fold(MatchStreamBuilder::new(), |builder, (opponent, outcome, home)| {
            builder.play(opponent, *outcome, *home)
        })
        .build()
}

/// A small but varied season against a handful of opponents
pub fn sample_season() -> Vec<MatchRecord> {
    let opponents = ["Yoshi", "Wario", "Peach", "Bowser", "Daisy"];
    let mut builder = MatchStreamBuilder::new();
    for i in 0..30usize {
        let opponent = opponents[(i * 3 + i / 4) % opponents.len()];
        let outcome = if (i * 7 + 3) % 5 < 3 {
            Outcome::Win
        } else {
            Outcome::Loss
        };
        builder = builder.play(opponent, outcome, i % 2 == 0);
    }
    builder.build()
}

/// Prediction with only the calibration-relevant fields meaningfully set
pub fn prediction(index: usize, probability: f64, outcome: Outcome) -> PredictionRecord {
    let actual = outcome.score();
    PredictionRecord {
        index,
        key: MatchKey::new(
            NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            1,
            index as u32,
        ),
        opponent: "Fixture".to_string(),
        home: false,
        map: None,
        probability,
        outcome,
        actual,
        tracked_rating_pre: 1500.0,
        tracked_rating_post: 1500.0,
        opponent_rating_pre: 1500.0,
        opponent_rating_post: 1500.0,
        tracked_delta: 0.0,
        opponent_delta: 0.0,
        surprise: actual - probability,
        class: MatchClass::classify(probability, outcome),
    }
}

pub fn predictions(pairs: &[(f64, Outcome)]) -> Vec<PredictionRecord> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, (p, outcome))| prediction(i, *p, *outcome))
        .collect()
}
