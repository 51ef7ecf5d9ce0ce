//! CSV export of game records.
//!
//! The header is always [`GAME_RECORD_COLUMNS`] and every row is rendered by
//! [`GameRecord::to_row`], so the file on disk is exactly the output contract.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use leaguesim_core::schema::GAME_RECORD_COLUMNS;
use leaguesim_core::{GameRecord, RecordSink, SimulationConfig, SinkError};

use crate::runner::{run_simulation, RunError, RunReport};

/// Streams records to any writer as CSV.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
    rows: u64,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            header_written: false,
            rows: 0,
        }
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::new("failed to flush CSV writer", e.into_error()))
    }

    fn ensure_header(&mut self) -> Result<(), SinkError> {
        if !self.header_written {
            self.writer
                .write_record(GAME_RECORD_COLUMNS)
                .map_err(|e| SinkError::new("failed to write CSV header", e))?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) `path`, creating parent directories as needed.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SinkError::new(format!("failed to create {}", parent.display()), e)
            })?;
        }
        let file = File::create(path)
            .map_err(|e| SinkError::new(format!("failed to create {}", path.display()), e))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn accept(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        self.ensure_header()?;
        self.writer
            .write_record(record.to_row())
            .map_err(|e| SinkError::new("failed to write CSV row", e))?;
        self.rows += 1;
        Ok(())
    }

    /// A run with zero games still produces a header-only file.
    fn finish(&mut self) -> Result<(), SinkError> {
        self.ensure_header()?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Render records to an in-memory CSV string.
pub fn games_to_csv(records: &[GameRecord]) -> Result<String, SinkError> {
    let mut sink = CsvSink::new(vec![]);
    for record in records {
        sink.accept(record)?;
    }
    sink.finish()?;
    let data = sink.into_inner()?;
    String::from_utf8(data).map_err(|e| SinkError::new("CSV output is not valid UTF-8", e))
}

/// Simulate `config` straight into a CSV file at `path`.
///
/// The config is validated first; nothing is created on disk when it fails.
pub fn write_games_csv(path: &Path, config: &SimulationConfig) -> Result<RunReport, RunError> {
    run_simulation(config, Some(path))
}
