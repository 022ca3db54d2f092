//! Rating state for every entity seen so far
//!
//! Entities are created lazily: [`RatingState::rating_or_seed`] is the only
//! place a new entry is inserted, always at the configured initial rating.

use crate::error::{AnalyticsError, Result};
use crate::types::{EntityId, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage entry for an entity's rating with its match tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub entity_id: EntityId,
    pub rating: f64,
    pub matches_played: u64,
    pub wins: u64,
    pub losses: u64,
}

impl RatingEntry {
    /// Create a new rating entry for an unseen entity
    pub fn new(entity_id: EntityId, initial_rating: f64) -> Self {
        Self {
            entity_id,
            rating: initial_rating,
            matches_played: 0,
            wins: 0,
            losses: 0,
        }
    }

    /// Apply a rating change and record the result from this entity's side
    pub fn apply(&mut self, delta: f64, outcome: Outcome) {
        self.rating += delta;
        self.matches_played += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
        }
    }
}

/// Mapping from entity to its current rating
#[derive(Debug, Clone)]
pub struct RatingState {
    entries: HashMap<EntityId, RatingEntry>,
    initial_rating: f64,
}

impl RatingState {
    /// Create an empty state that seeds new entities at `initial_rating`
    pub fn new(initial_rating: f64) -> Self {
        Self {
            entries: HashMap::new(),
            initial_rating,
        }
    }

    /// Current rating of `entity_id`, inserting the initial rating on first sight
    pub fn rating_or_seed(&mut self, entity_id: &str) -> f64 {
        let initial_rating = self.initial_rating;
        self.entries
            .entry(entity_id.to_string())
            .or_insert_with(|| RatingEntry::new(entity_id.to_string(), initial_rating))
            .rating
    }

    /// Current rating of an entity that must already have been seeded
    pub fn rating(&self, entity_id: &str) -> Result<f64> {
        self.entry(entity_id).map(|entry| entry.rating)
    }

    pub fn entry(&self, entity_id: &str) -> Result<&RatingEntry> {
        self.entries.get(entity_id).ok_or_else(|| {
            AnalyticsError::UnknownEntity {
                entity_id: entity_id.to_string(),
            }
            .into()
        })
    }

    /// Add `delta` to a seeded entity's stored rating
    pub fn apply(&mut self, entity_id: &str, delta: f64, outcome: Outcome) -> Result<f64> {
        let entry = self
            .entries
            .get_mut(entity_id)
            .ok_or_else(|| AnalyticsError::UnknownEntity {
                entity_id: entity_id.to_string(),
            })?;

        entry.apply(delta, outcome);
        Ok(entry.rating)
    }

    pub fn contains(&self, entity_id: &str) -> bool {
        self.entries.contains_key(entity_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, highest rating first; ties broken by id
    pub fn snapshot(&self) -> Vec<RatingEntry> {
        let mut entries: Vec<RatingEntry> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| a.entity_id.cmp(&b.entity_id))
        });
        entries
    }
}
