//! Team: per-team simulation state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::form::FormWindow;
use super::ids::TeamId;

/// One simulated team: a fixed code plus the state the season loop mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Short code written to the output (e.g. `LAL`).
    pub code: String,
    /// Latent strength on the Elo scale. Drifts between seasons.
    pub base_strength: i64,
    /// `None` until the team plays its first game of the season.
    pub last_played: Option<NaiveDate>,
    pub recent_results: FormWindow,
}

impl Team {
    pub fn new(id: TeamId, code: impl Into<String>, base_strength: i64) -> Self {
        Self {
            id,
            code: code.into(),
            base_strength,
            last_played: None,
            recent_results: FormWindow::new(),
        }
    }

    pub fn recent_win_rate(&self) -> f64 {
        self.recent_results.win_rate()
    }

    /// Forget last season's schedule and form.
    pub fn reset_for_season(&mut self) {
        self.last_played = None;
        self.recent_results.clear();
    }
}
