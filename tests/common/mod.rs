//! Shared test fixtures for integration tests.

use chrono::{DateTime, Local, TimeZone};
use hydro_resort_sim::config::ScenarioConfig;
use hydro_resort_sim::sim::engine::Engine;

/// Fixed simulated start time (2024-06-01 00:00 local).
pub fn start() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .single()
        .expect("midnight should exist in the local zone")
}

/// Small-plant scenario shortened to `days` (200 kW turbine, 200 kWh battery, 150 kW generator).
pub fn small_plant(days: u32) -> ScenarioConfig {
    let mut scenario = ScenarioConfig::small_plant();
    scenario.simulation.num_days = days;
    scenario
}

/// Engine for `scenario` starting at [`start`].
pub fn engine(scenario: ScenarioConfig) -> Engine {
    Engine::starting_at(scenario, start()).expect("scenario should be valid")
}
