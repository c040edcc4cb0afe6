//! Resort microgrid simulator entry point: CLI wiring and config-driven engine construction.

mod cli;

use std::io::{self, Write};

use anyhow::{Context, bail};
use chrono::Local;
use clap::Parser;
use tracing::{error, info};

use hydro_resort_sim::config::ScenarioConfig;
use hydro_resort_sim::io::export::{RunMetadata, export_run, metadata_path};
use hydro_resort_sim::sim::engine::Engine;
use hydro_resort_sim::sim::kpi::KpiReport;

use crate::cli::Args;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Loads the scenario: `--scenario` first, then `--preset`, then the baseline.
fn load_scenario(args: &Args) -> anyhow::Result<ScenarioConfig> {
    let scenario = if let Some(path) = &args.scenario {
        ScenarioConfig::from_toml_file(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?
    } else if let Some(name) = &args.preset {
        ScenarioConfig::from_preset(name)?
    } else {
        ScenarioConfig::baseline()
    };
    Ok(scenario)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut scenario = load_scenario(&args)?;
    if let Some(days) = args.days {
        scenario.simulation.num_days = days;
    }

    if let Err(invalid) = scenario.check() {
        for e in &invalid.0 {
            error!("{e}");
        }
        bail!("scenario has {} invalid setting(s)", invalid.0.len());
    }

    let start = args
        .start
        .map_or_else(Local::now, |s| s.with_timezone(&Local));
    let fuel_cost_per_kwh = scenario.generator.fuel_cost_per_kwh;
    let mut engine = Engine::starting_at(scenario, start)?;

    let records = engine.run();
    let kpi = KpiReport::from_records(&records, engine.config().dt_hours, fuel_cost_per_kwh);

    let mut out = io::stdout().lock();
    if !args.quiet {
        for r in &records {
            if args.json {
                writeln!(out, "{}", serde_json::to_string(r)?)?;
            } else {
                writeln!(out, "{r}")?;
            }
        }
        writeln!(out)?;
    }
    writeln!(out, "{kpi}")?;
    out.flush()?;

    if let Some(path) = &args.telemetry_out {
        let meta = RunMetadata::new(&args.run_name, start, engine.config());
        export_run(&meta, &records, path)
            .with_context(|| format!("failed to write telemetry to {}", path.display()))?;
        info!(
            csv = %path.display(),
            metadata = %metadata_path(path).display(),
            run_id = %meta.run_id,
            "telemetry written"
        );
    }

    Ok(())
}
