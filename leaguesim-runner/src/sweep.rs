//! Multi-seed sweeps.
//!
//! Each seed is a fully independent run with its own generator, so seeds are
//! spread across the rayon pool and the results are identical to running them
//! one after another.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::info;

use leaguesim_core::SimulationConfig;

use crate::runner::{run_simulation, RunError, RunReport};

/// File name used for one seed's dataset inside a sweep directory.
pub fn seed_file_name(seed: u64) -> String {
    format!("games_seed_{seed}.csv")
}

pub fn seed_output_path(dir: &Path, seed: u64) -> PathBuf {
    dir.join(seed_file_name(seed))
}

/// Run `base` once per seed in parallel. Reports come back in `seeds` order.
///
/// With `output_dir`, each seed also writes its own CSV there.
pub fn run_seed_sweep(
    base: &SimulationConfig,
    seeds: &[u64],
    output_dir: Option<&Path>,
) -> Result<Vec<RunReport>, RunError> {
    base.validate()?;

    let mut seen = HashSet::with_capacity(seeds.len());
    if let Some(&dup) = seeds.iter().find(|s| !seen.insert(**s)) {
        return Err(RunError::DuplicateSeed(dup));
    }

    info!(seeds = seeds.len(), "starting seed sweep");

    let reports = seeds
        .par_iter()
        .map(|&seed| {
            let config = base.clone().with_seed(seed);
            let path = output_dir.map(|dir| seed_output_path(dir, seed));
            run_simulation(&config, path.as_deref())
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(runs = reports.len(), "seed sweep complete");
    Ok(reports)
}

/// Cross-seed spread of the headline rates.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepStats {
    pub runs: usize,
    pub mean_home_win_rate: f64,
    pub min_home_win_rate: f64,
    pub max_home_win_rate: f64,
    pub mean_home_win_prob: f64,
}

pub fn sweep_stats(reports: &[RunReport]) -> Option<SweepStats> {
    if reports.is_empty() {
        return None;
    }
    let n = reports.len() as f64;
    let rates: Vec<f64> = reports.iter().map(|r| r.summary.home_win_rate).collect();
    Some(SweepStats {
        runs: reports.len(),
        mean_home_win_rate: rates.iter().sum::<f64>() / n,
        min_home_win_rate: rates.iter().copied().fold(f64::INFINITY, f64::min),
        max_home_win_rate: rates.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        mean_home_win_prob: reports
            .iter()
            .map(|r| r.summary.mean_home_win_prob)
            .sum::<f64>()
            / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SimulationConfig {
        SimulationConfig {
            seasons: 1,
            games_per_season: 80,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn reports_follow_seed_order() {
        let seeds = [5, 1, 9, 3];
        let reports = run_seed_sweep(&base(), &seeds, None).unwrap();
        let got: Vec<u64> = reports.iter().map(|r| r.summary.seed).collect();
        assert_eq!(got, seeds);
    }

    #[test]
    fn parallel_equals_sequential() {
        let seeds = [11, 12, 13];
        let parallel = run_seed_sweep(&base(), &seeds, None).unwrap();
        for (report, &seed) in parallel.iter().zip(&seeds) {
            let solo = run_simulation(&base().with_seed(seed), None).unwrap();
            assert_eq!(report.summary, solo.summary);
        }
    }

    #[test]
    fn duplicate_seed_is_rejected() {
        let err = run_seed_sweep(&base(), &[1, 2, 1], None).unwrap_err();
        assert!(matches!(err, RunError::DuplicateSeed(1)));
    }

    #[test]
    fn empty_sweep_is_empty() {
        assert!(run_seed_sweep(&base(), &[], None).unwrap().is_empty());
        assert!(sweep_stats(&[]).is_none());
    }

    #[test]
    fn stats_bound_the_rates() {
        let reports = run_seed_sweep(&base(), &[1, 2, 3, 4], None).unwrap();
        let stats = sweep_stats(&reports).unwrap();
        assert_eq!(stats.runs, 4);
        assert!(stats.min_home_win_rate <= stats.mean_home_win_rate);
        assert!(stats.mean_home_win_rate <= stats.max_home_win_rate);
    }

    #[test]
    fn writes_one_file_per_seed() {
        let dir = tempfile::tempdir().unwrap();
        let reports = run_seed_sweep(&base(), &[7, 8], Some(dir.path())).unwrap();
        for (report, seed) in reports.iter().zip([7u64, 8]) {
            let path = seed_output_path(dir.path(), seed);
            assert!(path.exists());
            assert_eq!(report.output.as_deref(), Some(path.as_path()));
        }
    }
}
