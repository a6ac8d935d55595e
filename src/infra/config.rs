//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml
//!
//! Every table and key is optional; missing values take the built-in
//! scoring constants.

use crate::domain::error::UnknownValue;
use crate::services::ranking::{KindFilter, RankingOptions};
use crate::services::scorer::ScoringParams;
use anyhow::{ensure, Context};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/dev.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    /// One JSON object per ranked location
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" | "jsonl" => Ok(OutputFormat::Json),
            _ => Err(UnknownValue::new("output format", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// JSON dataset of shelters and other locations
    #[serde(default = "default_data_file")]
    pub file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { file: default_data_file() }
    }
}

fn default_data_file() -> String {
    "data/locations.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_distance_share")]
    pub distance_share: f64,
    #[serde(default = "default_occupancy_share")]
    pub occupancy_share: f64,
    #[serde(default = "default_half_weight_km")]
    pub half_weight_km: f64,
    #[serde(default = "default_window_radius_days")]
    pub window_radius_days: u16,
    #[serde(default = "default_older_year_share")]
    pub older_year_share: f64,
    #[serde(default = "default_recent_year_share")]
    pub recent_year_share: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            distance_share: default_distance_share(),
            occupancy_share: default_occupancy_share(),
            half_weight_km: default_half_weight_km(),
            window_radius_days: default_window_radius_days(),
            older_year_share: default_older_year_share(),
            recent_year_share: default_recent_year_share(),
        }
    }
}

fn default_distance_share() -> f64 {
    ScoringParams::default().distance_share
}

fn default_occupancy_share() -> f64 {
    ScoringParams::default().occupancy_share
}

fn default_half_weight_km() -> f64 {
    ScoringParams::default().half_weight_km
}

fn default_window_radius_days() -> u16 {
    ScoringParams::default().window_radius_days
}

fn default_older_year_share() -> f64 {
    ScoringParams::default().older_year_share
}

fn default_recent_year_share() -> f64 {
    ScoringParams::default().recent_year_share
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    /// Maximum rows printed (0 = all)
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub kind: KindFilter,
    #[serde(default)]
    pub include_ineligible: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            kind: KindFilter::default(),
            include_ineligible: false,
            format: OutputFormat::default(),
        }
    }
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    data_file: String,
    scoring: ScoringParams,
    ranking: RankingOptions,
    output_format: OutputFormat,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            scoring: ScoringParams::default(),
            ranking: RankingOptions::default(),
            output_format: OutputFormat::Table,
            config_file: "default".to_string(),
        }
    }
}

fn validate_scoring(params: &ScoringParams) -> anyhow::Result<()> {
    ensure!(
        params.half_weight_km.is_finite() && params.half_weight_km > 0.0,
        "scoring.half_weight_km must be a positive number, got {}",
        params.half_weight_km
    );
    for (name, share) in [
        ("distance_share", params.distance_share),
        ("occupancy_share", params.occupancy_share),
        ("older_year_share", params.older_year_share),
        ("recent_year_share", params.recent_year_share),
    ] {
        ensure!(share.is_finite() && share >= 0.0, "scoring.{} must be >= 0, got {}", name, share);
    }
    let year_total = params.older_year_share + params.recent_year_share;
    ensure!(
        (year_total - 1.0).abs() < 1e-9,
        "scoring.older_year_share + scoring.recent_year_share must be 1, got {}",
        year_total
    );
    Ok(())
}

impl Config {
    /// Determine config file path from the CLI flag or environment
    pub fn resolve_config_path(cli_path: Option<&str>) -> String {
        if let Some(path) = cli_path {
            return path.to_string();
        }

        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        DEFAULT_CONFIG_PATH.to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        let scoring = ScoringParams {
            distance_share: toml_config.scoring.distance_share,
            occupancy_share: toml_config.scoring.occupancy_share,
            half_weight_km: toml_config.scoring.half_weight_km,
            window_radius_days: toml_config.scoring.window_radius_days,
            older_year_share: toml_config.scoring.older_year_share,
            recent_year_share: toml_config.scoring.recent_year_share,
        };
        validate_scoring(&scoring)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        Ok(Self {
            data_file: toml_config.data.file,
            scoring,
            ranking: RankingOptions {
                kind: toml_config.ranking.kind,
                limit: toml_config.ranking.limit,
                include_ineligible: toml_config.ranking.include_ineligible,
            },
            output_format: toml_config.ranking.format,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration from a path, falling back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    pub fn data_file(&self) -> &str {
        &self.data_file
    }

    pub fn scoring_params(&self) -> ScoringParams {
        self.scoring
    }

    pub fn ranking_options(&self) -> RankingOptions {
        self.ranking
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests to override scoring constants
    #[cfg(test)]
    pub fn with_scoring_params(mut self, params: ScoringParams) -> Self {
        self.scoring = params;
        self
    }
}
