//! Game-record output contract: the boundary with downstream feature extraction.
//!
//! Defines the exact column names, their order, and how each [`GameRecord`]
//! field is rendered. Downstream readers key on these names, so any change
//! here is a breaking change to every dataset already on disk.

use crate::domain::GameRecord;

pub const COLUMN_COUNT: usize = 16;

/// Header row, in contract order.
pub const GAME_RECORD_COLUMNS: [&str; COLUMN_COUNT] = [
    "season",
    "date",
    "home_team",
    "away_team",
    "home_rating",
    "away_rating",
    "home_rest_days",
    "away_rest_days",
    "home_injury_impact",
    "away_injury_impact",
    "home_recent_winrate",
    "away_recent_winrate",
    "home_win_prob",
    "home_score",
    "away_score",
    "home_win",
];

impl GameRecord {
    /// Render this record as one output row, in contract column order.
    ///
    /// Ratings are written as integers truncated toward zero; the in-memory
    /// record keeps full precision.
    pub fn to_row(&self) -> [String; COLUMN_COUNT] {
        [
            self.season.to_string(),
            self.date.format("%Y-%m-%d").to_string(),
            self.home_team.clone(),
            self.away_team.clone(),
            (self.home_rating.trunc() as i64).to_string(),
            (self.away_rating.trunc() as i64).to_string(),
            self.home_rest_days.to_string(),
            self.away_rest_days.to_string(),
            self.home_injury_impact.to_string(),
            self.away_injury_impact.to_string(),
            format!("{:.3}", self.home_recent_winrate),
            format!("{:.3}", self.away_recent_winrate),
            format!("{:.4}", self.home_win_prob),
            self.home_score.to_string(),
            self.away_score.to_string(),
            if self.home_win { "1" } else { "0" }.to_string(),
        ]
    }
}

/// Result of checking a header row against the contract.
#[derive(Debug, Clone)]
pub struct SchemaValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Check that `header` is exactly the contract columns, in order.
pub fn validate_header<S: AsRef<str>>(header: &[S]) -> SchemaValidation {
    let mut errors = Vec::new();

    for (idx, expected) in GAME_RECORD_COLUMNS.iter().enumerate() {
        match header.get(idx).map(|h| h.as_ref()) {
            Some(name) if name == *expected => {}
            Some(name) => errors.push(format!("column {idx}: expected '{expected}', got '{name}'")),
            None => errors.push(format!("missing required column '{expected}'")),
        }
    }

    for extra in header.iter().skip(COLUMN_COUNT) {
        errors.push(format!("unexpected column '{}' (not in schema)", extra.as_ref()));
    }

    SchemaValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}
