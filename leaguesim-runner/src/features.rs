//! Feature extraction: turn a game dataset into model-ready rows.
//!
//! Two input layouts are recognized:
//! - **Mock**: files written by this workspace (`home_rating`, `away_rating`,
//!   `home_win`, plus any of the optional context columns)
//! - **FiveThirtyEight**: public Elo files (`elo1_pre`, `elo2_pre`, `score1`,
//!   `score2`), where the target is derived from the final score
//!
//! The mock layout wins when a file carries both column sets. Rows with an
//! empty or unparseable value in any used column are dropped and counted.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const MOCK_REQUIRED: [&str; 3] = ["home_rating", "away_rating", "home_win"];

pub const MOCK_OPTIONAL: [&str; 7] = [
    "home_rest_days",
    "away_rest_days",
    "home_injury_impact",
    "away_injury_impact",
    "home_recent_winrate",
    "away_recent_winrate",
    "home_win_prob",
];

pub const FTE_REQUIRED: [&str; 4] = ["elo1_pre", "elo2_pre", "score1", "score2"];

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(
        "unrecognized dataset schema: expected mock columns ({}, ...) or FiveThirtyEight columns ({}); found [{}]",
        MOCK_REQUIRED.join(", "),
        FTE_REQUIRED.join(", "),
        .found.join(", ")
    )]
    Unrecognized { found: Vec<String> },

    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DatasetSchema {
    Mock,
    FiveThirtyEight,
}

/// Pick the layout a header row matches.
pub fn detect_schema<S: AsRef<str>>(headers: &[S]) -> Result<DatasetSchema, SchemaError> {
    let has = |name: &str| headers.iter().any(|h| h.as_ref() == name);
    if MOCK_REQUIRED.iter().all(|c| has(c)) {
        Ok(DatasetSchema::Mock)
    } else if FTE_REQUIRED.iter().all(|c| has(c)) {
        Ok(DatasetSchema::FiveThirtyEight)
    } else {
        Err(SchemaError::Unrecognized {
            found: headers.iter().map(|h| h.as_ref().to_string()).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub home_elo: f64,
    pub away_elo: f64,
    pub elo_diff: f64,
    /// Values for [`FeatureSet::optional_columns`], same order.
    pub extra: Vec<f64>,
    pub home_win: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSet {
    pub schema: DatasetSchema,
    /// Optional mock columns that were present in the input.
    pub optional_columns: Vec<&'static str>,
    pub rows: Vec<FeatureRow>,
    /// Input rows discarded for missing or malformed values.
    pub dropped: usize,
}

impl FeatureSet {
    /// Output header: `home_elo, away_elo, elo_diff, [optional...], home_win`.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut cols = vec!["home_elo", "away_elo", "elo_diff"];
        cols.extend(self.optional_columns.iter().copied());
        cols.push("home_win");
        cols
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Column positions resolved once from the header.
enum Layout {
    Mock {
        home: usize,
        away: usize,
        win: usize,
        extra: Vec<usize>,
    },
    FiveThirtyEight {
        home: usize,
        away: usize,
        score1: usize,
        score2: usize,
    },
}

fn position<S: AsRef<str>>(headers: &[S], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.as_ref() == name)
}

fn number(row: &[String], idx: usize) -> Option<f64> {
    let raw = row.get(idx)?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// `0`/`1` target. Float-typed columns (`1.0`, `0.0`) are accepted.
fn flag(row: &[String], idx: usize) -> Option<u8> {
    match number(row, idx)? {
        v if v == 0.0 => Some(0),
        v if v == 1.0 => Some(1),
        _ => None,
    }
}

impl Layout {
    fn resolve<S: AsRef<str>>(
        schema: DatasetSchema,
        headers: &[S],
    ) -> Option<(Self, Vec<&'static str>)> {
        match schema {
            DatasetSchema::Mock => {
                let optional: Vec<&'static str> = MOCK_OPTIONAL
                    .iter()
                    .copied()
                    .filter(|c| position(headers, c).is_some())
                    .collect();
                let extra = optional
                    .iter()
                    .map(|c| position(headers, c))
                    .collect::<Option<Vec<_>>>()?;
                let layout = Layout::Mock {
                    home: position(headers, "home_rating")?,
                    away: position(headers, "away_rating")?,
                    win: position(headers, "home_win")?,
                    extra,
                };
                Some((layout, optional))
            }
            DatasetSchema::FiveThirtyEight => {
                let layout = Layout::FiveThirtyEight {
                    home: position(headers, "elo1_pre")?,
                    away: position(headers, "elo2_pre")?,
                    score1: position(headers, "score1")?,
                    score2: position(headers, "score2")?,
                };
                Some((layout, Vec::new()))
            }
        }
    }

    fn extract(&self, row: &[String]) -> Option<FeatureRow> {
        match self {
            Layout::Mock {
                home,
                away,
                win,
                extra,
            } => {
                let home_elo = number(row, *home)?;
                let away_elo = number(row, *away)?;
                let extra = extra
                    .iter()
                    .map(|&idx| number(row, idx))
                    .collect::<Option<Vec<_>>>()?;
                Some(FeatureRow {
                    home_elo,
                    away_elo,
                    elo_diff: home_elo - away_elo,
                    extra,
                    home_win: flag(row, *win)?,
                })
            }
            Layout::FiveThirtyEight {
                home,
                away,
                score1,
                score2,
            } => {
                let home_elo = number(row, *home)?;
                let away_elo = number(row, *away)?;
                let s1 = number(row, *score1)?;
                let s2 = number(row, *score2)?;
                Some(FeatureRow {
                    home_elo,
                    away_elo,
                    elo_diff: home_elo - away_elo,
                    extra: Vec::new(),
                    home_win: u8::from(s1 > s2),
                })
            }
        }
    }
}

/// Extract features from an already-split table.
pub fn extract_features<S, R>(headers: &[S], rows: R) -> Result<FeatureSet, SchemaError>
where
    S: AsRef<str>,
    R: IntoIterator<Item = Vec<String>>,
{
    let schema = detect_schema(headers)?;
    let (layout, optional_columns) =
        Layout::resolve(schema, headers).ok_or_else(|| SchemaError::Unrecognized {
            found: headers.iter().map(|h| h.as_ref().to_string()).collect(),
        })?;

    let mut out = Vec::new();
    let mut dropped = 0usize;
    for row in rows {
        match layout.extract(&row) {
            Some(features) => out.push(features),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, kept = out.len(), "dropped rows with missing or malformed values");
    }
    debug!(?schema, rows = out.len(), "features extracted");

    Ok(FeatureSet {
        schema,
        optional_columns,
        rows: out,
        dropped,
    })
}

/// Read a CSV (header row first) and extract features from it.
pub fn extract_features_from_csv<R: Read>(reader: R) -> Result<FeatureSet, SchemaError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        rows.push(record?.iter().map(str::to_string).collect::<Vec<_>>());
    }
    extract_features(&headers, rows)
}

pub fn extract_features_from_path(path: &Path) -> Result<FeatureSet, SchemaError> {
    let file = File::open(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract_features_from_csv(file)
}

/// Write a feature set as CSV.
pub fn write_features_csv<W: Write>(features: &FeatureSet, writer: W) -> Result<(), SchemaError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(features.columns())?;
    for row in &features.rows {
        let mut fields = vec![
            row.home_elo.to_string(),
            row.away_elo.to_string(),
            row.elo_diff.to_string(),
        ];
        fields.extend(row.extra.iter().map(f64::to_string));
        fields.push(row.home_win.to_string());
        wtr.write_record(&fields)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    // ── Schema detection ──

    #[test]
    fn detects_mock() {
        assert_eq!(
            detect_schema(&["home_win", "away_rating", "home_rating"]).unwrap(),
            DatasetSchema::Mock
        );
    }

    #[test]
    fn detects_fivethirtyeight() {
        assert_eq!(
            detect_schema(&["date", "elo1_pre", "elo2_pre", "score1", "score2"]).unwrap(),
            DatasetSchema::FiveThirtyEight
        );
    }

    #[test]
    fn mock_wins_when_both_present() {
        let headers = [
            "home_rating", "away_rating", "home_win", "elo1_pre", "elo2_pre", "score1", "score2",
        ];
        assert_eq!(detect_schema(&headers).unwrap(), DatasetSchema::Mock);
    }

    #[test]
    fn unknown_schema_names_both_sets_and_found_columns() {
        let err = detect_schema(&["team", "points"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("home_rating"));
        assert!(msg.contains("elo1_pre"));
        assert!(msg.contains("team, points"));
    }

    // ── Extraction ──

    #[test]
    fn mock_rows_map_to_elo_features() {
        let headers = ["home_rating", "away_rating", "home_rest_days", "home_win"];
        let rows = vec![
            strings(&["1600", "1550", "2", "1"]),
            strings(&["1500", "1525", "3", "0"]),
        ];
        let set = extract_features(&headers, rows).unwrap();
        assert_eq!(set.optional_columns, vec!["home_rest_days"]);
        assert_eq!(
            set.columns(),
            vec!["home_elo", "away_elo", "elo_diff", "home_rest_days", "home_win"]
        );
        assert_eq!(set.rows[0].elo_diff, 50.0);
        assert_eq!(set.rows[0].extra, vec![2.0]);
        assert_eq!(set.rows[1].elo_diff, -25.0);
        assert_eq!(set.rows[1].home_win, 0);
    }

    #[test]
    fn optional_columns_keep_canonical_order() {
        let headers = ["home_win_prob", "home_rating", "away_rest_days", "away_rating", "home_win"];
        let rows = vec![strings(&["0.6", "1600", "4", "1500", "1"])];
        let set = extract_features(&headers, rows).unwrap();
        assert_eq!(set.optional_columns, vec!["away_rest_days", "home_win_prob"]);
        assert_eq!(set.rows[0].extra, vec![4.0, 0.6]);
    }

    #[test]
    fn fivethirtyeight_target_from_scores() {
        let headers = ["elo1_pre", "elo2_pre", "score1", "score2"];
        let rows = vec![
            strings(&["1500.5", "1480.0", "101", "99"]),
            strings(&["1500.5", "1480.0", "90", "99"]),
            strings(&["1500.5", "1480.0", "100", "100"]),
        ];
        let set = extract_features(&headers, rows).unwrap();
        let wins: Vec<u8> = set.rows.iter().map(|r| r.home_win).collect();
        assert_eq!(wins, vec![1, 0, 0]);
        assert!((set.rows[0].elo_diff - 20.5).abs() < 1e-12);
        assert_eq!(set.columns(), vec!["home_elo", "away_elo", "elo_diff", "home_win"]);
    }

    #[test]
    fn malformed_rows_are_dropped_and_counted() {
        let headers = ["home_rating", "away_rating", "home_win"];
        let rows = vec![
            strings(&["1600", "1500", "1"]),
            strings(&["", "1500", "1"]),
            strings(&["abc", "1500", "0"]),
            strings(&["1600", "1500", "2"]),
            strings(&["1600", "1500"]),
        ];
        let set = extract_features(&headers, rows).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.dropped, 4);
    }

    #[test]
    fn float_typed_target_is_accepted() {
        let headers = ["home_rating", "away_rating", "home_win"];
        let rows = vec![
            strings(&["1600", "1500", "1.0"]),
            strings(&["1600", "1500", "0.0"]),
            strings(&["1600", "1500", " 1 "]),
            strings(&["1600", "1500", "0.5"]),
        ];
        let set = extract_features(&headers, rows).unwrap();
        let wins: Vec<u8> = set.rows.iter().map(|r| r.home_win).collect();
        assert_eq!(wins, vec![1, 0, 1]);
        assert_eq!(set.dropped, 1);
    }

    // ── CSV I/O ──

    #[test]
    fn csv_roundtrip_through_writer() {
        let input = "home_rating,away_rating,home_win\n1600,1500,1\n1510,1540,0\n";
        let set = extract_features_from_csv(input.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_features_csv(&set, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "home_elo,away_elo,elo_diff,home_win");
        assert_eq!(lines[1], "1600,1500,100,1");
        assert_eq!(lines[2], "1510,1540,-30,0");
    }

    #[test]
    fn empty_input_with_header_gives_empty_set() {
        let header = "elo1_pre,elo2_pre,score1,score2\n";
        let set = extract_features_from_csv(header.as_bytes()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.dropped, 0);
    }
}
