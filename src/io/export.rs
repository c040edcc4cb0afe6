//! CSV telemetry export and run metadata for simulation records.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::sim::types::{SimConfig, StepRecord};

/// Column header for CSV telemetry export.
const HEADER: &str = "run_id,ts,step,demand_kw,available_hydro_kw,hydro_kw,battery_kw,\
                      generator_kw,spilled_kw,unserved_kw,battery_soc,reservoir_level_m3,\
                      total_guests";

/// Extension given to the metadata file written next to the telemetry CSV.
pub const METADATA_EXTENSION: &str = "run.toml";

/// Failure while writing telemetry or run metadata.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("telemetry I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("run metadata serialization failed: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Identity and timing of one run, written once alongside its telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: String,
    pub name: String,
    pub started_at: DateTime<Local>,
    pub num_days: u32,
    pub time_step_minutes: u32,
}

impl RunMetadata {
    /// Describes a run named `name` starting at `started_at`.
    ///
    /// The run id combines the name with the start timestamp.
    pub fn new(name: &str, started_at: DateTime<Local>, timing: &SimConfig) -> Self {
        Self {
            run_id: format!("{name}-{}", started_at.format("%Y%m%dT%H%M%S")),
            name: name.to_string(),
            started_at,
            num_days: timing.num_days,
            time_step_minutes: timing.time_step_minutes,
        }
    }

    pub fn to_toml(&self) -> Result<String, ExportError> {
        Ok(toml::to_string(self)?)
    }
}

/// Path of the metadata file that accompanies the telemetry CSV at `csv_path`.
pub fn metadata_path(csv_path: &Path) -> PathBuf {
    csv_path.with_extension(METADATA_EXTENSION)
}

/// Exports a run: telemetry CSV at `path`, metadata TOML beside it.
///
/// # Arguments
///
/// * `meta` - Run identity and timing
/// * `records` - Complete simulation step records
/// * `path` - Output CSV path
///
/// # Errors
///
/// Returns an `ExportError` if either file cannot be created or written.
pub fn export_run(
    meta: &RunMetadata,
    records: &[StepRecord],
    path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(&meta.run_id, records, io::BufWriter::new(file))?;
    fs::write(metadata_path(path), meta.to_toml()?)?;
    Ok(())
}

/// Writes simulation records as CSV to any writer.
///
/// Produces a header row and one data row per record, with fixed decimals and
/// RFC 3339 timestamps, so identical inputs give identical bytes.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_csv(
    run_id: &str,
    records: &[StepRecord],
    writer: impl Write,
) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in records {
        wtr.write_record(&[
            run_id.to_string(),
            r.time.to_rfc3339(),
            r.step.to_string(),
            format!("{:.4}", r.demand_kw),
            format!("{:.4}", r.available_hydro_kw),
            format!("{:.4}", r.hydro_kw),
            format!("{:.4}", r.battery_kw),
            format!("{:.4}", r.generator_kw),
            format!("{:.4}", r.spilled_kw),
            format!("{:.4}", r.unserved_kw),
            format!("{:.4}", r.battery_soc),
            format!("{:.2}", r.reservoir_level_m3),
            r.resort.total_guests.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
