//! Command-line entry point for the match-analytics pipeline
//!
//! Reads typed match records as JSON, runs the rating engine and calibration
//! analysis, and writes the resulting report as JSON to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use match_analytics::config::{AppConfig, ConfigOverrides};
use match_analytics::{AnalyticsReport, MatchRecord};
use std::io::Read;
use std::path::PathBuf;
use tracing::{error, info};

/// Match Analytics - Elo ratings and calibration for a match log
#[derive(Parser)]
#[command(
    name = "match-analytics",
    version,
    about = "Sequential Elo ratings and win-probability calibration for a match log",
    long_about = "Reads a chronologically ordered JSON array of match records for one tracked \
                 side, computes pre-match win probabilities with a sequential Elo model, and \
                 reports final ratings, per-match predictions, recent form and calibration \
                 (Brier score and reliability table) as JSON."
)]
struct Args {
    /// Match records (JSON array); stdin when omitted
    #[arg(short, long, value_name = "FILE", help = "Path to match records (JSON array)")]
    input: Option<PathBuf>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// K-factor override
    #[arg(long, value_name = "K", help = "Override Elo K-factor")]
    k_factor: Option<f64>,

    /// Home advantage override
    #[arg(
        long,
        value_name = "POINTS",
        allow_negative_numbers = true,
        help = "Override home-advantage rating points"
    )]
    home_advantage: Option<f64>,

    /// Initial rating override
    #[arg(long, value_name = "RATING", help = "Override rating for unseen entities")]
    initial_rating: Option<f64>,

    /// Bin width override
    #[arg(long, value_name = "WIDTH", help = "Override reliability bin width")]
    bin_width: Option<f64>,

    /// Recent window override
    #[arg(long, value_name = "N", help = "Number of most recent matches to summarize")]
    recent: Option<usize>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without processing input")]
    dry_run: bool,

    /// Pretty-print the JSON report
    #[arg(long, help = "Pretty-print the JSON report")]
    pretty: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            log_level: self.log_level.clone(),
            debug: self.debug,
            k_factor: self.k_factor,
            home_advantage: self.home_advantage,
            initial_rating: self.initial_rating,
            bin_width: self.bin_width,
            recent_matches: self.recent,
        }
    }
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Log the effective configuration
fn display_config(config: &AppConfig) {
    info!("Match Analytics ({})", config.service.name);
    info!("   K-factor: {}", config.rating.k_factor);
    info!("   Home advantage: {}", config.rating.home_advantage);
    info!("   Initial rating: {}", config.rating.initial_rating);
    info!(
        "   Bin width: {} ({} bins)",
        config.calibration.bin_width,
        config.calibration.bin_count()
    );
    info!("   Recent window: {}", config.report.recent_matches);
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    AppConfig::load(args.config.as_deref(), &args.overrides())
}

/// Read the match records from a file or stdin
fn read_records(input: Option<&PathBuf>) -> Result<Vec<MatchRecord>> {
    let contents = match input {
        Some(path) => {
            info!("Reading match records from: {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            info!("Reading match records from stdin");
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    serde_json::from_str(&contents).context("Match records are not a valid JSON array")
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let records = read_records(args.input.as_ref())?;
    info!("Loaded {} match records", records.len());

    let report = AnalyticsReport::build(config, &records)?;

    if let Some(rating) = report.tracked_rating() {
        info!("Final tracked rating: {:.1}", rating);
    }
    if let Some(form) = &report.recent_form {
        info!(
            "Last {} matches: {}-{} ({:+.2} vs expectation)",
            form.matches, form.wins, form.losses, form.over_under
        );
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_config(&config);
        info!("Dry run completed - exiting without processing input");
        return Ok(());
    }

    display_config(&config);

    if let Err(e) = run(&args, &config) {
        error!("Analytics run failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_overrides() {
        let args = Args::parse_from([
            "match-analytics",
            "--k-factor",
            "30",
            "--home-advantage",
            "-40",
            "--recent",
            "6",
            "--debug",
        ]);
        let overrides = args.overrides();

        assert_eq!(overrides.k_factor, Some(30.0));
        assert_eq!(overrides.home_advantage, Some(-40.0));
        assert_eq!(overrides.recent_matches, Some(6));
        assert_eq!(overrides.bin_width, None);
        assert!(overrides.debug);
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir()
            .join(format!("match-analytics-cli-{}.toml", std::process::id()));
        std::fs::write(&path, "[rating]\nk_factor = 16.0\nhome_advantage = 30.0\n").unwrap();

        let args = Args::parse_from([
            "match-analytics",
            "--config",
            path.to_str().unwrap(),
            "--k-factor",
            "28",
        ]);
        let config = load_config(&args);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.rating.k_factor, 28.0);
        assert_eq!(config.rating.home_advantage, 30.0);
    }

    #[test]
    fn test_invalid_flag_value_rejected() {
        let path = std::env::temp_dir()
            .join(format!("match-analytics-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "").unwrap();

        let args = Args::parse_from([
            "match-analytics",
            "--config",
            path.to_str().unwrap(),
            "--bin-width",
            "1e-12",
        ]);
        let result = load_config(&args);
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
