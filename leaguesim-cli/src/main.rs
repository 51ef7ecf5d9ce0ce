//! League simulator CLI: dataset generation, sweeps, and feature extraction.
//!
//! Commands:
//! - `simulate`: generate a synthetic game dataset as CSV
//! - `sweep`: run the same league under several seeds in parallel
//! - `features`: turn a mock or FiveThirtyEight dataset into model features
//! - `check`: validate a dataset header against the output contract

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use leaguesim_core::schema::validate_header;
use leaguesim_core::SimulationConfig;
use leaguesim_runner::config::parse_date;
use leaguesim_runner::{
    extract_features_from_path, run_seed_sweep, run_simulation, sweep_stats, write_features_csv,
    RunConfig, RunReport,
};

#[derive(Parser)]
#[command(
    name = "leaguesim",
    about = "League simulator: seeded synthetic basketball game datasets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a game dataset as CSV.
    Simulate {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Generator seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Number of seasons.
        #[arg(long)]
        seasons: Option<u32>,

        /// Games per season.
        #[arg(long)]
        games: Option<u32>,

        /// First calendar date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// Output CSV. Defaults to the config's `[output] path`, then data/mock_games.csv.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the run summary as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run one simulation per seed in parallel.
    Sweep {
        /// Comma-separated seeds (e.g., 1,2,3).
        #[arg(long, value_delimiter = ',', required = true)]
        seeds: Vec<u64>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write one CSV per seed into this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Extract model features from a game dataset.
    Features {
        /// Input CSV (mock or FiveThirtyEight layout).
        #[arg(long)]
        input: PathBuf,

        /// Output CSV.
        #[arg(long)]
        output: PathBuf,
    },
    /// Validate a dataset header against the output column contract.
    Check {
        /// Input CSV.
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            seed,
            seasons,
            games,
            start,
            output,
            json,
        } => run_simulate_cmd(config, seed, seasons, games, start, output, json),
        Commands::Sweep {
            seeds,
            config,
            output_dir,
        } => run_sweep_cmd(&seeds, config, output_dir),
        Commands::Features { input, output } => run_features_cmd(&input, &output),
        Commands::Check { input } => run_check_cmd(&input),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leaguesim_core=warn,leaguesim_runner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_run_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(p) => RunConfig::from_file(p)
            .with_context(|| format!("failed to load config {}", p.display())),
        None => Ok(RunConfig::default()),
    }
}

fn run_simulate_cmd(
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    seasons: Option<u32>,
    games: Option<u32>,
    start: Option<String>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let run_config = load_run_config(config_path.as_deref())?;
    let mut config = run_config
        .simulation_config()
        .context("invalid simulation config")?;

    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(seasons) = seasons {
        config.seasons = seasons;
    }
    if let Some(games) = games {
        config.games_per_season = games;
    }
    if let Some(start) = start.as_deref() {
        config.base_date = parse_date(start)?;
    }
    config.validate().context("invalid command-line overrides")?;
    debug!(?config, "resolved simulation config");

    let output = output.unwrap_or_else(|| run_config.output_path());
    let report = run_simulation(&config, Some(output.as_path()))
        .with_context(|| format!("simulation into {} failed", output.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.summary)?);
    } else {
        print_summary(&config, &report);
    }
    Ok(())
}

fn run_sweep_cmd(
    seeds: &[u64],
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    if seeds.is_empty() {
        bail!("--seeds must name at least one seed");
    }
    let config = load_run_config(config_path.as_deref())?
        .simulation_config()
        .context("invalid simulation config")?;

    let reports = run_seed_sweep(&config, seeds, output_dir.as_deref()).context("sweep failed")?;

    println!(
        "{:>10}  {:>6}  {:>9}  {:>9}  {:>8}  hash",
        "seed", "rows", "home_win%", "mean_prob", "disagree"
    );
    for r in &reports {
        let s = &r.summary;
        println!(
            "{:>10}  {:>6}  {:>8.1}%  {:>9.4}  {:>8}  {}",
            s.seed,
            s.rows,
            s.home_win_rate * 100.0,
            s.mean_home_win_prob,
            s.score_disagreements,
            s.dataset_hash.get(..16).unwrap_or(s.dataset_hash.as_str())
        );
    }
    if let Some(stats) = sweep_stats(&reports) {
        println!(
            "\n{} runs: home win rate {:.1}% (min {:.1}%, max {:.1}%), mean probability {:.4}",
            stats.runs,
            stats.mean_home_win_rate * 100.0,
            stats.min_home_win_rate * 100.0,
            stats.max_home_win_rate * 100.0,
            stats.mean_home_win_prob
        );
    }
    if let Some(dir) = output_dir {
        println!("Datasets written to: {}", dir.display());
    }
    Ok(())
}

fn run_features_cmd(input: &Path, output: &Path) -> Result<()> {
    let features = extract_features_from_path(input)
        .with_context(|| format!("failed to extract features from {}", input.display()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    write_features_csv(&features, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Schema:   {:?}", features.schema);
    println!("Rows:     {} ({} dropped)", features.len(), features.dropped);
    println!("Columns:  {}", features.columns().join(", "));
    println!("Saved to: {}", output.display());
    Ok(())
}

fn run_check_cmd(input: &Path) -> Result<()> {
    let mut rdr = csv::Reader::from_path(input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let header: Vec<String> = rdr
        .headers()
        .with_context(|| format!("failed to read header of {}", input.display()))?
        .iter()
        .map(String::from)
        .collect();

    let validation = validate_header(&header);
    if !validation.is_valid {
        for err in &validation.errors {
            eprintln!("  {err}");
        }
        bail!(
            "{} does not match the game record contract ({} problems)",
            input.display(),
            validation.errors.len()
        );
    }
    println!("{}: header OK ({} columns)", input.display(), header.len());
    Ok(())
}

fn print_summary(config: &SimulationConfig, report: &RunReport) {
    let s = &report.summary;
    println!("=== League Simulation ===");
    println!("Teams:          {}", config.teams.join(" "));
    println!("Seed:           {}", s.seed);
    println!("Seasons:        {} x {} games", s.seasons, config.games_per_season);
    if let (Some(first), Some(last)) = (s.first_date, s.last_date) {
        println!("Dates:          {first} to {last}");
    }
    println!("Rows:           {}", s.rows);
    println!("Home win rate:  {:.1}%", s.home_win_rate * 100.0);
    println!("Mean P(home):   {:.4}", s.mean_home_win_prob);
    println!("Mean points:    {:.1}", s.mean_total_points);
    println!("Injured sides:  {}", s.injured_sides);
    println!("Score/outcome disagreements: {}", s.score_disagreements);
    println!("Dataset hash:   {}", s.dataset_hash);
    if let Some(path) = &report.output {
        println!("Saved to:       {}", path.display());
    }
}
