//! Simulation clock and its randomized cadence.
//!
//! The date only ever moves forward: by zero or one day around each game and
//! by a fixed off-season gap between seasons.

use chrono::{Duration, NaiveDate};

use crate::rng::SimRng;

/// Rest assumed for a team that has not played yet this season.
pub const DEFAULT_REST_DAYS: i64 = 3;

/// Rest days are capped here.
pub const MAX_REST_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct CalendarAdvancer {
    current: NaiveDate,
}

impl CalendarAdvancer {
    pub fn new(start: NaiveDate) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    /// With the given probability, burn one idle day before the next game.
    /// Returns whether the date moved.
    pub fn maybe_skip_day(&mut self, probability: f64, rng: &mut SimRng) -> bool {
        self.step_with(probability, rng)
    }

    /// Days since `last_played`, capped at [`MAX_REST_DAYS`], or
    /// [`DEFAULT_REST_DAYS`] when the team has not played this season.
    pub fn rest_days(&self, last_played: Option<NaiveDate>) -> i64 {
        match last_played {
            None => DEFAULT_REST_DAYS,
            Some(last) => (self.current - last).num_days().min(MAX_REST_DAYS),
        }
    }

    /// With the given probability, move on one day after a game.
    /// Returns whether the date moved.
    pub fn advance_after_game(&mut self, probability: f64, rng: &mut SimRng) -> bool {
        self.step_with(probability, rng)
    }

    pub fn advance_between_seasons(&mut self, days: u32) {
        self.current += Duration::days(i64::from(days));
    }

    fn step_with(&mut self, probability: f64, rng: &mut SimRng) -> bool {
        let moved = rng.chance(probability);
        if moved {
            self.current += Duration::days(1);
        }
        moved
    }
}
