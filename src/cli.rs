use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::Parser;

/// Hydro-powered resort microgrid simulator.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Load the scenario from a TOML file.
    #[clap(long, value_name = "PATH", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, small_plant, dry_season).
    #[clap(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override the number of simulated days.
    #[clap(long)]
    pub days: Option<u32>,

    /// Simulated start time (RFC 3339); defaults to now.
    #[clap(long, value_name = "RFC3339")]
    pub start: Option<DateTime<FixedOffset>>,

    /// Export step records to CSV, with run metadata beside it.
    #[clap(long, value_name = "PATH")]
    pub telemetry_out: Option<PathBuf>,

    /// Run name recorded in the telemetry.
    #[clap(long, default_value = "run")]
    pub run_name: String,

    /// Print each step record as a JSON line.
    #[clap(long)]
    pub json: bool,

    /// Suppress per-step output; only the KPI report is printed.
    #[clap(long)]
    pub quiet: bool,
}
