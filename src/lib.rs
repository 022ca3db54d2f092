//! Match Analytics - sequential Elo ratings and calibration analysis
//!
//! This crate turns a chronological stream of match results for one tracked
//! side into pre-match win probabilities and rating histories, and checks
//! how well those probabilities matched the outcomes.

pub mod calibration;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{AnalyticsError, Result};
pub use types::*;

// Re-export key components
pub use calibration::{CalibrationAnalyzer, CalibrationSummary};
pub use pipeline::AnalyticsReport;
pub use rating::{RatingEngine, RatingRun};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
