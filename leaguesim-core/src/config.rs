//! Simulation parameters and up-front validation.
//!
//! `SimulationConfig::default()` reproduces the reference league: ten teams,
//! two seasons of 600 games, seed 42, starting 2022-10-01. Every model
//! constant is a knob here so tests can pin or force individual effects.
//! `validate()` runs before the season loop starts; an invalid config never
//! produces a partial record stream.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Team codes used when no roster is supplied.
pub const DEFAULT_TEAMS: [&str; 10] = [
    "LAL", "BOS", "GSW", "PHX", "MIL", "DEN", "MIA", "DAL", "NYK", "CHI",
];

/// Errors raised by [`SimulationConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("at least 2 teams are required, got {count}")]
    TooFewTeams { count: usize },

    #[error("team id must not be empty")]
    EmptyTeamId,

    #[error("duplicate team id '{0}'")]
    DuplicateTeam(String),

    #[error("seasons must be at least 1")]
    NoSeasons,

    #[error("games_per_season must be at least 1")]
    NoGames,

    #[error("{field}: min {min} is greater than max {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field}: probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    #[error("injury.impacts must list at least one impact value")]
    NoInjuryImpacts,

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

/// Inclusive integer range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: self.min as f64,
                max: self.max as f64,
            });
        }
        Ok(())
    }
}

/// Latent team strength: initial draw and between-season drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthConfig {
    pub initial: IntRange,
    pub season_drift: IntRange,
}

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            initial: IntRange::new(1480, 1620),
            season_drift: IntRange::new(-25, 25),
        }
    }
}

/// Calendar cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Chance of an idle day before a game is scheduled.
    pub skip_day_probability: f64,
    /// Chance the calendar moves on one day after a game.
    pub advance_day_probability: f64,
    pub offseason_gap_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            skip_day_probability: 0.15,
            advance_day_probability: 0.75,
            offseason_gap_days: 120,
        }
    }
}

/// Sporadic injury penalties, in rating points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryConfig {
    pub chance: f64,
    pub impacts: Vec<u32>,
}

impl Default for InjuryConfig {
    fn default() -> Self {
        Self {
            chance: 0.12,
            impacts: vec![10, 15, 20, 25, 35, 50],
        }
    }
}

/// Effective-rating adjustments and the Elo probability curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingConfig {
    pub home_court_bonus: f64,
    /// Points per day of rest advantage.
    pub rest_weight: f64,
    /// Points per unit of win-rate advantage.
    pub form_weight: f64,
    /// Rating gap that multiplies the odds by 10.
    pub elo_scale: f64,
    /// Half-width of the uniform noise added to the Elo probability.
    pub probability_noise: f64,
    pub probability_floor: f64,
    pub probability_ceiling: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            home_court_bonus: 55.0,
            rest_weight: 6.0,
            form_weight: 50.0,
            elo_scale: 400.0,
            probability_noise: 0.03,
            probability_floor: 0.01,
            probability_ceiling: 0.99,
        }
    }
}

/// Cosmetic final-score generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreConfig {
    pub base_points: f64,
    /// Rating points per point of expected margin shift.
    pub rating_divisor: f64,
    /// Standard deviation of the per-team gaussian noise.
    pub spread: f64,
    pub min_score: u32,
    pub max_score: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            base_points: 108.0,
            rating_divisor: 50.0,
            spread: 8.0,
            min_score: 80,
            max_score: 150,
        }
    }
}

/// Complete parameter set for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub teams: Vec<String>,
    pub seasons: u32,
    pub games_per_season: u32,
    pub seed: u64,
    pub base_date: NaiveDate,
    #[serde(default)]
    pub strength: StrengthConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub injury: InjuryConfig,
    #[serde(default)]
    pub rating: RatingConfig,
    #[serde(default)]
    pub score: ScoreConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            teams: DEFAULT_TEAMS.iter().map(|t| t.to_string()).collect(),
            seasons: 2,
            games_per_season: 600,
            seed: 42,
            base_date: default_base_date(),
            strength: StrengthConfig::default(),
            schedule: ScheduleConfig::default(),
            injury: InjuryConfig::default(),
            rating: RatingConfig::default(),
            score: ScoreConfig::default(),
        }
    }
}

/// Opening day of the reference league.
pub fn default_base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 10, 1).unwrap_or_default()
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Total number of records a valid run emits.
    pub fn total_games(&self) -> u64 {
        u64::from(self.seasons) * u64::from(self.games_per_season)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.teams.len() < 2 {
            return Err(ConfigError::TooFewTeams {
                count: self.teams.len(),
            });
        }
        let mut seen = HashSet::new();
        for team in &self.teams {
            if team.trim().is_empty() {
                return Err(ConfigError::EmptyTeamId);
            }
            if !seen.insert(team.as_str()) {
                return Err(ConfigError::DuplicateTeam(team.clone()));
            }
        }
        if self.seasons == 0 {
            return Err(ConfigError::NoSeasons);
        }
        if self.games_per_season == 0 {
            return Err(ConfigError::NoGames);
        }

        self.strength.initial.check("strength.initial")?;
        self.strength.season_drift.check("strength.season_drift")?;

        check_probability(
            "schedule.skip_day_probability",
            self.schedule.skip_day_probability,
        )?;
        check_probability(
            "schedule.advance_day_probability",
            self.schedule.advance_day_probability,
        )?;

        check_probability("injury.chance", self.injury.chance)?;
        if self.injury.impacts.is_empty() {
            return Err(ConfigError::NoInjuryImpacts);
        }

        let rating = &self.rating;
        check_positive("rating.elo_scale", rating.elo_scale)?;
        if rating.probability_noise.is_nan() || rating.probability_noise < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "rating.probability_noise",
                value: rating.probability_noise,
            });
        }
        check_probability("rating.probability_floor", rating.probability_floor)?;
        check_probability("rating.probability_ceiling", rating.probability_ceiling)?;
        if rating.probability_floor > rating.probability_ceiling {
            return Err(ConfigError::InvertedRange {
                field: "rating.probability_floor/ceiling",
                min: rating.probability_floor,
                max: rating.probability_ceiling,
            });
        }

        check_positive("score.rating_divisor", self.score.rating_divisor)?;
        check_positive("score.spread", self.score.spread)?;
        if self.score.min_score > self.score.max_score {
            return Err(ConfigError::InvertedRange {
                field: "score.min_score/max_score",
                min: f64::from(self.score.min_score),
                max: f64::from(self.score.max_score),
            });
        }

        Ok(())
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ProbabilityOutOfRange { field, value });
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_nan() || value <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}
