use std::env;
use std::path::PathBuf;

use crate::services::heuristic::{DEFAULT_SAMPLES, DEFAULT_SEED};
use crate::types::ScoringProfile;

/// Knobs that change the numbers in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Weight table used by the trend scorer.
    pub scoring_profile: ScoringProfile,
    /// Seed for the synthetic heuristic's sampler.
    pub heuristic_seed: u64,
    /// Number of synthetic samples drawn per evaluation.
    pub heuristic_samples: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scoring_profile: ScoringProfile::Canonical,
            heuristic_seed: DEFAULT_SEED,
            heuristic_samples: DEFAULT_SAMPLES,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Symbol used when the input file does not name one.
    pub symbol: String,
    /// JSON input file with the bars and sentiment payloads.
    pub input: PathBuf,
    /// Directory receiving `<YYYYMMDD>.json` reports.
    pub output_dir: PathBuf,
    /// Fan timeframes out over blocking tasks.
    pub concurrent: bool,
    pub analysis: AnalysisConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = AnalysisConfig::default();

        Self {
            symbol: env::var("SEXTANT_SYMBOL").unwrap_or_else(|_| "NDX".to_string()),
            input: env::var("SEXTANT_INPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("input.json")),
            output_dir: env::var("SEXTANT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("reports")),
            concurrent: env::var("SEXTANT_CONCURRENT")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            analysis: AnalysisConfig {
                scoring_profile: env::var("SEXTANT_SCORING_PROFILE")
                    .ok()
                    .and_then(|v| ScoringProfile::from_str(&v))
                    .unwrap_or(defaults.scoring_profile),
                heuristic_seed: env::var("SEXTANT_HEURISTIC_SEED")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.heuristic_seed),
                heuristic_samples: env::var("SEXTANT_HEURISTIC_SAMPLES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.heuristic_samples),
            },
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value == "true" || value == "1"
}
