//! GameRecord: one fully specified simulated game.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of a simulated game.
///
/// All contextual fields are pre-game values: recent win rates exclude the
/// game itself, and the ratings are the adjusted ratings before any outcome
/// noise. The record owns copies of the team codes and never refers back to
/// registry state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub season: u32,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_rating: f64,
    pub away_rating: f64,
    pub home_rest_days: i64,
    pub away_rest_days: i64,
    pub home_injury_impact: u32,
    pub away_injury_impact: u32,
    pub home_recent_winrate: f64,
    pub away_recent_winrate: f64,
    pub home_win_prob: f64,
    pub home_score: u32,
    pub away_score: u32,
    pub home_win: bool,
}

impl GameRecord {
    pub fn rating_diff(&self) -> f64 {
        self.home_rating - self.away_rating
    }

    /// Whether the scoreline points the same way as the sampled outcome.
    ///
    /// Scores are drawn independently of the outcome, so this is routinely
    /// false (including ties on points).
    pub fn score_agrees_with_outcome(&self) -> bool {
        if self.home_win {
            self.home_score > self.away_score
        } else {
            self.away_score > self.home_score
        }
    }
}
