//! Error types for the rating and calibration pipeline
//!
//! Fallible functions return the anyhow-based [`Result`] alias; the typed
//! [`AnalyticsError`] can be recovered with `downcast_ref` when a caller
//! needs to branch on the failure kind.

use crate::types::MatchKey;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific analytics scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyticsError {
    #[error("No input supplied to {component}")]
    EmptyInput { component: String },

    #[error("Match {index} is out of order: {current} comes before {previous}")]
    OutOfOrderInput {
        index: usize,
        previous: MatchKey,
        current: MatchKey,
    },

    #[error("Rating requested for unknown entity: {entity_id}")]
    UnknownEntity { entity_id: String },

    #[error("Invalid match record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl AnalyticsError {
    pub(crate) fn empty_input(component: &str) -> Self {
        AnalyticsError::EmptyInput {
            component: component.to_string(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        AnalyticsError::ConfigurationError {
            message: message.into(),
        }
    }
}
