//! Sequential Elo rating for the tracked side and its opponents
//!
//! This module provides the Elo model, the per-entity rating state and the
//! engine that walks a match stream in chronological order.

pub mod elo;
pub mod engine;
pub mod storage;

// Re-export commonly used types
pub use elo::EloCalculator;
pub use engine::{RatingEngine, RatingRun};
pub use storage::{RatingEntry, RatingState};
