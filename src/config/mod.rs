//! Configuration management for the match-analytics pipeline
//!
//! Configuration is loaded from defaults, environment variables or a TOML
//! file, validated, and then passed explicitly to the rating engine and the
//! calibration analyzer.

pub mod app;
pub mod calibration;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ConfigOverrides, ReportSettings, ServiceSettings};
pub use calibration::{CalibrationConfig, MAX_BIN_COUNT};
pub use rating::RatingConfig;
