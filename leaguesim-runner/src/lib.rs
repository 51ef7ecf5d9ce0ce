//! League simulator runner: config files, dataset export, sweeps, features.
//!
//! This crate builds on `leaguesim-core` to provide:
//! - TOML run configuration resolved against core defaults
//! - Streaming CSV export in the output column contract
//! - BLAKE3 dataset fingerprints and per-run summaries
//! - Parallel multi-seed sweeps
//! - Feature extraction for mock and FiveThirtyEight datasets

pub mod config;
pub mod export;
pub mod features;
pub mod fingerprint;
pub mod runner;
pub mod summary;
pub mod sweep;

pub use config::{ConfigError, RunConfig};
pub use export::{games_to_csv, write_games_csv, CsvSink};
pub use features::{
    detect_schema, extract_features, extract_features_from_csv, extract_features_from_path,
    write_features_csv, DatasetSchema, FeatureRow, FeatureSet, SchemaError,
};
pub use fingerprint::{hash_records, DatasetHasher};
pub use runner::{run_simulation, RunError, RunReport, TeeSink};
pub use summary::{RunSummary, SummarySink};
pub use sweep::{run_seed_sweep, sweep_stats, SweepStats};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn run_report_is_send_sync() {
        assert_send::<RunReport>();
        assert_sync::<RunReport>();
    }

    #[test]
    fn run_error_is_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
    }

    #[test]
    fn feature_set_is_send_sync() {
        assert_send::<FeatureSet>();
        assert_sync::<FeatureSet>();
    }
}
