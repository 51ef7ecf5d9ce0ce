//! Aggregate statistics over a generated dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use leaguesim_core::{GameRecord, RecordSink, SinkError};

/// What a finished run looks like at a glance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub rows: u64,
    pub seasons: u32,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub home_win_rate: f64,
    pub mean_home_win_prob: f64,
    pub mean_total_points: f64,
    /// Games whose scoreline names a different winner than `home_win`.
    pub score_disagreements: u64,
    pub injured_sides: u64,
    pub dataset_hash: String,
}

/// Accumulates a [`RunSummary`] while records stream past.
#[derive(Debug, Default)]
pub struct SummarySink {
    rows: u64,
    max_season: u32,
    first_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
    home_wins: u64,
    prob_sum: f64,
    points_sum: u64,
    disagreements: u64,
    injured_sides: u64,
}

impl SummarySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, r: &GameRecord) {
        self.rows += 1;
        self.max_season = self.max_season.max(r.season);
        self.first_date.get_or_insert(r.date);
        self.last_date = Some(r.date);
        if r.home_win {
            self.home_wins += 1;
        }
        self.prob_sum += r.home_win_prob;
        self.points_sum += u64::from(r.home_score) + u64::from(r.away_score);
        if !r.score_agrees_with_outcome() {
            self.disagreements += 1;
        }
        self.injured_sides +=
            u64::from(r.home_injury_impact > 0) + u64::from(r.away_injury_impact > 0);
    }

    pub fn summarize(&self, seed: u64, dataset_hash: String) -> RunSummary {
        let n = self.rows.max(1) as f64;
        let mean = |sum: f64| if self.rows == 0 { 0.0 } else { sum / n };
        RunSummary {
            seed,
            rows: self.rows,
            seasons: self.max_season,
            first_date: self.first_date,
            last_date: self.last_date,
            home_win_rate: mean(self.home_wins as f64),
            mean_home_win_prob: mean(self.prob_sum),
            mean_total_points: mean(self.points_sum as f64),
            score_disagreements: self.disagreements,
            injured_sides: self.injured_sides,
            dataset_hash,
        }
    }
}

impl RecordSink for SummarySink {
    fn accept(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        self.observe(record);
        Ok(())
    }
}
