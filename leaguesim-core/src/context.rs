//! Matchup context: per-game rest, injury, and form features.
//!
//! Context is read from registry and calendar state *before* the game's own
//! result is recorded. Building it never mutates either; the only state it
//! touches is the generator, for injury draws.

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarAdvancer;
use crate::config::InjuryConfig;
use crate::domain::TeamId;
use crate::registry::TeamRegistry;
use crate::rng::SimRng;

/// Pre-game features for one matchup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchupContext {
    pub home_rest: i64,
    pub away_rest: i64,
    pub home_injury: u32,
    pub away_injury: u32,
    pub home_form: f64,
    pub away_form: f64,
}

impl MatchupContext {
    /// Two fresh teams at the start of a season with nobody injured.
    pub fn neutral() -> Self {
        Self {
            home_rest: crate::calendar::DEFAULT_REST_DAYS,
            away_rest: crate::calendar::DEFAULT_REST_DAYS,
            home_injury: 0,
            away_injury: 0,
            home_form: 0.5,
            away_form: 0.5,
        }
    }
}

/// Sporadic injury penalty sampler.
#[derive(Debug, Clone)]
pub struct InjuryModel {
    chance: f64,
    impacts: Vec<u32>,
}

impl InjuryModel {
    pub fn new(chance: f64, impacts: Vec<u32>) -> Self {
        Self { chance, impacts }
    }

    pub fn from_config(config: &InjuryConfig) -> Self {
        Self::new(config.chance, config.impacts.clone())
    }

    /// Same impact set, different firing probability.
    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = chance;
        self
    }

    /// Zero most of the time; otherwise one impact drawn uniformly.
    pub fn sample(&self, rng: &mut SimRng) -> u32 {
        if rng.chance(self.chance) {
            rng.choose(&self.impacts).copied().unwrap_or(0)
        } else {
            0
        }
    }
}

/// Read-only view used to assemble a [`MatchupContext`].
pub struct MatchupContextBuilder<'a> {
    registry: &'a TeamRegistry,
    calendar: &'a CalendarAdvancer,
    injuries: &'a InjuryModel,
}

impl<'a> MatchupContextBuilder<'a> {
    pub fn new(
        registry: &'a TeamRegistry,
        calendar: &'a CalendarAdvancer,
        injuries: &'a InjuryModel,
    ) -> Self {
        Self {
            registry,
            calendar,
            injuries,
        }
    }

    /// Draw order is fixed (home injury, then away injury) so a seed replays
    /// identically.
    pub fn build(&self, home: TeamId, away: TeamId, rng: &mut SimRng) -> MatchupContext {
        debug_assert_ne!(home, away, "a team cannot play itself");

        let home_rest = self.calendar.rest_days(self.registry.last_played(home));
        let away_rest = self.calendar.rest_days(self.registry.last_played(away));

        let home_injury = self.injuries.sample(rng);
        let away_injury = self.injuries.sample(rng);

        MatchupContext {
            home_rest,
            away_rest,
            home_injury,
            away_injury,
            home_form: self.registry.recent_win_rate(home),
            away_form: self.registry.recent_win_rate(away),
        }
    }
}
