//! Consolidated CSV output
//!
//! The table is written to a temporary file next to the destination and then
//! renamed over it, so readers see either the previous file or the complete
//! new one.

use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::forecast::ForecastReading;

pub const OUTPUT_HEADER: [&str; 3] = ["date", "timestamp", "actual_demand_mw"];

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to replace {path}: {msg}")]
    Persist { path: String, msg: String },
}

#[derive(Serialize)]
struct OutputRow<'a> {
    date: String,
    timestamp: &'a str,
    actual_demand_mw: String,
}

impl<'a> From<&'a ForecastReading> for OutputRow<'a> {
    fn from(reading: &'a ForecastReading) -> Self {
        Self {
            date: reading.date.format("%Y-%m-%d").to_string(),
            timestamp: &reading.time_of_day,
            actual_demand_mw: format_demand(reading.demand_mw),
        }
    }
}

/// Demand in shortest round-trip form, keeping one fractional digit for whole values
///
/// `100.0` stays `100.0` and `4523.7` stays `4523.7`.
pub fn format_demand(value: f64) -> String {
    let text = value.to_string();
    if text.contains(&['.', 'e', 'E'][..]) || !value.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

/// Write readings as CSV to `writer`, header first
pub fn write_readings<W: Write>(writer: W, readings: &[ForecastReading]) -> Result<(), OutputError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for reading in readings {
        csv_writer.serialize(OutputRow::from(reading))?;
    }
    if readings.is_empty() {
        csv_writer.write_record(OUTPUT_HEADER)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Replace `path` with the consolidated table
///
/// Missing parent directories are created. Any existing file at `path` is
/// overwritten only once the new content has been fully written.
pub fn persist_readings(path: &Path, readings: &[ForecastReading]) -> Result<(), OutputError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    write_readings(tmp.as_file_mut(), readings)?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| OutputError::Persist {
        path: path.display().to_string(),
        msg: e.error.to_string(),
    })?;

    debug!("Wrote {} rows to {}", readings.len(), path.display());
    Ok(())
}
