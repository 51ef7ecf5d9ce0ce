//! TOML run configuration.
//!
//! ```toml
//! [simulation]
//! teams = ["LAL", "BOS", "GSW"]
//! seasons = 2
//! games_per_season = 600
//! seed = 42
//! base_date = "2022-10-01"
//!
//! [simulation.injury]
//! chance = 0.12
//! impacts = [10, 15, 20, 25, 35, 50]
//!
//! [output]
//! path = "data/mock_games.csv"
//! ```
//!
//! Every key is optional; missing keys fall back to
//! [`SimulationConfig::default`]. Model sub-tables (`strength`, `schedule`,
//! `injury`, `rating`, `score`) replace the defaults as a whole when present.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use leaguesim_core::config::{
    InjuryConfig, RatingConfig, ScheduleConfig, ScoreConfig, StrengthConfig,
};
use leaguesim_core::SimulationConfig;

/// Default CSV destination when neither the file nor the CLI names one.
pub const DEFAULT_OUTPUT_PATH: &str = "data/mock_games.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid base_date '{value}' (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Simulation(#[from] leaguesim_core::ConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    pub teams: Option<Vec<String>>,
    pub seasons: Option<u32>,
    pub games_per_season: Option<u32>,
    pub seed: Option<u64>,
    /// `YYYY-MM-DD`
    pub base_date: Option<String>,
    pub strength: Option<StrengthConfig>,
    pub schedule: Option<ScheduleConfig>,
    pub injury: Option<InjuryConfig>,
    pub rating: Option<RatingConfig>,
    pub score: Option<ScoreConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub path: Option<PathBuf>,
}

/// File-level configuration: simulation knobs plus where to write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub simulation: SimulationSection,
    pub output: OutputSection,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve against defaults and validate.
    pub fn simulation_config(&self) -> Result<SimulationConfig, ConfigError> {
        let defaults = SimulationConfig::default();
        let s = &self.simulation;

        let base_date = match &s.base_date {
            Some(value) => parse_date(value)?,
            None => defaults.base_date,
        };

        let config = SimulationConfig {
            teams: s.teams.clone().unwrap_or(defaults.teams),
            seasons: s.seasons.unwrap_or(defaults.seasons),
            games_per_season: s.games_per_season.unwrap_or(defaults.games_per_season),
            seed: s.seed.unwrap_or(defaults.seed),
            base_date,
            strength: s.strength.clone().unwrap_or(defaults.strength),
            schedule: s.schedule.clone().unwrap_or(defaults.schedule),
            injury: s.injury.clone().unwrap_or(defaults.injury),
            rating: s.rating.clone().unwrap_or(defaults.rating),
            score: s.score.clone().unwrap_or(defaults.score),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH))
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| ConfigError::InvalidDate {
        value: value.to_string(),
        source,
    })
}
