use std::fs;
use std::process::{Command, Output};

#[derive(Debug)]
struct Kpis {
    hydro_share_pct: f64,
    generator_kwh: f64,
    unserved_steps: f64,
    fuel_cost: f64,
}

#[test]
fn scenario_presets_run_via_cli_and_produce_distinct_dynamics() {
    let baseline = run_and_parse_kpis(&["--preset", "baseline", "--days", "2"]);
    let small_plant = run_and_parse_kpis(&["--scenario", "scenarios/small_plant.toml", "--days", "2"]);
    let dry_season = run_and_parse_kpis(&["--scenario", "scenarios/dry_season.toml", "--days", "2"]);

    assert_eq!(
        baseline.unserved_steps, 0.0,
        "baseline should serve every step: {baseline:?}"
    );

    assert!(
        baseline.hydro_share_pct - dry_season.hydro_share_pct > 20.0,
        "expected dry_season to lean on other sources: baseline={:.1}%, dry_season={:.1}%",
        baseline.hydro_share_pct,
        dry_season.hydro_share_pct
    );

    assert!(
        dry_season.generator_kwh > baseline.generator_kwh,
        "expected more generator energy in dry_season: baseline={:.2}, dry_season={:.2}",
        baseline.generator_kwh,
        dry_season.generator_kwh
    );

    assert!(
        dry_season.fuel_cost > 0.0,
        "dry_season should burn fuel: {dry_season:?}"
    );

    assert!(
        (small_plant.hydro_share_pct - baseline.hydro_share_pct).abs() > f64::EPSILON
            || (small_plant.generator_kwh - baseline.generator_kwh).abs() > f64::EPSILON,
        "expected small_plant to differ from baseline: {small_plant:?} vs {baseline:?}"
    );
}

#[test]
fn days_override_sets_record_count() {
    let output = run(&["--preset", "small_plant", "--days", "1", "--start", "2024-06-01T00:00:00+00:00"]);
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    let records = stdout.lines().filter(|l| l.starts_with("t=")).count();
    assert_eq!(records, 96);
}

#[test]
fn json_output_emits_one_object_per_step() {
    let output = run(&["--preset", "small_plant", "--days", "1", "--json"]);
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    let objects: Vec<serde_json::Value> = stdout
        .lines()
        .filter(|l| l.starts_with('{'))
        .map(|l| serde_json::from_str(l).expect("line should be valid JSON"))
        .collect();
    assert_eq!(objects.len(), 96);
    assert_eq!(objects[0]["step"], 0);
    assert!(objects[0]["resort"]["demand_kw"].is_number());
}

#[test]
fn telemetry_out_writes_csv_and_metadata() {
    let dir = std::env::temp_dir().join(format!("hydro-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir should be creatable");
    let csv_path = dir.join("telemetry.csv");
    let csv_arg = csv_path.to_str().expect("temp path should be UTF-8");

    run(&[
        "--preset",
        "dry_season",
        "--days",
        "1",
        "--quiet",
        "--run-name",
        "dry",
        "--telemetry-out",
        csv_arg,
    ]);

    let csv_text = fs::read_to_string(&csv_path).expect("telemetry CSV should exist");
    assert_eq!(csv_text.lines().count(), 97);
    assert!(csv_text.lines().nth(1).is_some_and(|l| l.starts_with("dry-")));

    let meta_text =
        fs::read_to_string(dir.join("telemetry.run.toml")).expect("metadata should exist");
    assert!(meta_text.contains("name = \"dry\""));
    assert!(meta_text.contains("num_days = 1"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn invalid_scenario_exits_with_every_error() {
    let dir = std::env::temp_dir().join(format!("hydro-cli-invalid-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir should be creatable");
    let path = dir.join("broken.toml");
    fs::write(
        &path,
        "[simulation]\ntime_step_minutes = 0\n\n[battery]\nround_trip_efficiency = 1.5\n",
    )
    .expect("scenario should be writable");

    let output = Command::new(env!("CARGO_BIN_EXE_hydro-resort-sim"))
        .args(["--scenario", path.to_str().expect("temp path should be UTF-8")])
        .env("NO_COLOR", "1")
        .output()
        .expect("hydro-resort-sim process should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulation.time_step_minutes"), "stderr={stderr}");
    assert!(stderr.contains("battery.round_trip_efficiency"), "stderr={stderr}");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn unknown_preset_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_hydro-resort-sim"))
        .args(["--preset", "monsoon"])
        .output()
        .expect("hydro-resort-sim process should run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}

fn run(args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_hydro-resort-sim"))
        .args(args)
        .output()
        .expect("hydro-resort-sim process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn run_and_parse_kpis(args: &[&str]) -> Kpis {
    let mut all = args.to_vec();
    all.push("--quiet");
    let output = run(&all);
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    parse_kpis(&stdout)
}

fn parse_kpis(stdout: &str) -> Kpis {
    Kpis {
        hydro_share_pct: parse_metric(stdout, "Hydro share:", "%"),
        generator_kwh: parse_metric(stdout, "Generator energy:", "kWh"),
        unserved_steps: parse_metric(stdout, "Unserved steps:", ""),
        fuel_cost: parse_metric(stdout, "Fuel cost:", ""),
    }
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing KPI line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid KPI format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from KPI line `{line}`"))
}
