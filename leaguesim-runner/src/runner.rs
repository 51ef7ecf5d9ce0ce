//! Run driver: one simulation pass feeding CSV, hash, and summary together.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use leaguesim_core::{
    ConfigError, GameRecord, RecordSink, RunStats, SeasonOrchestrator, SimulationConfig,
    SimulationError, SinkError,
};

use crate::export::CsvSink;
use crate::fingerprint::DatasetHasher;
use crate::summary::{RunSummary, SummarySink};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("output error: {0}")]
    Output(#[from] SinkError),
    #[error("seed {0} appears more than once in the sweep")]
    DuplicateSeed(u64),
}

/// Fans each record out to several sinks, in the order they were added.
///
/// The first failing sink stops the fan-out for that record.
#[derive(Default)]
pub struct TeeSink<'a> {
    sinks: Vec<&'a mut dyn RecordSink>,
}

impl<'a> TeeSink<'a> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with(mut self, sink: &'a mut dyn RecordSink) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl RecordSink for TeeSink<'_> {
    fn accept(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        for sink in self.sinks.iter_mut() {
            sink.accept(record)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        for sink in self.sinks.iter_mut() {
            sink.finish()?;
        }
        Ok(())
    }
}

/// Outcome of a single run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: RunStats,
    pub summary: RunSummary,
    /// Where the CSV went, if anywhere.
    pub output: Option<PathBuf>,
}

/// Simulate `config`, hashing and summarizing every record, and stream the
/// CSV to `output` when given.
///
/// Validation happens before the output file is created.
pub fn run_simulation(
    config: &SimulationConfig,
    output: Option<&Path>,
) -> Result<RunReport, RunError> {
    let orchestrator = SeasonOrchestrator::new(config.clone())?;
    let mut hasher = DatasetHasher::new();
    let mut summary = SummarySink::new();

    let stats = match output {
        Some(path) => {
            let mut csv = CsvSink::create(path)?;
            let mut tee = TeeSink::new()
                .with(&mut csv)
                .with(&mut hasher)
                .with(&mut summary);
            let stats = orchestrator.run(&mut tee)?;
            csv.into_inner()?;
            info!(path = %path.display(), rows = stats.games, "wrote dataset");
            stats
        }
        None => {
            let mut tee = TeeSink::new().with(&mut hasher).with(&mut summary);
            orchestrator.run(&mut tee)?
        }
    };

    let summary = summary.summarize(config.seed, hasher.hex());
    info!(
        seed = config.seed,
        rows = summary.rows,
        home_win_rate = summary.home_win_rate,
        hash = %summary.dataset_hash,
        "run complete"
    );

    Ok(RunReport {
        stats,
        summary,
        output: output.map(Path::to_path_buf),
    })
}
