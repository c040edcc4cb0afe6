//! Mutable simulation state owned by the engine.

use chrono::{DateTime, Local};

use crate::config::HydroConfig;
use crate::devices::Occupancy;

use super::clock::Clock;

/// Reservoir fill fraction and battery SoC at start or reset.
pub const INITIAL_FILL: f64 = 0.5;

/// Everything that changes from one step to the next.
///
/// Created at 50% reservoir fill, 50% SoC, and an empty resort.
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    /// Step counter and simulated time.
    pub clock: Clock,
    /// Reservoir volume (m³, between 0 and the full volume).
    pub reservoir_level_m3: f64,
    /// Battery state of charge (0.0 to 1.0).
    pub battery_soc: f64,
    /// Rooms and shared-area customers.
    pub occupancy: Occupancy,
}

impl SimState {
    /// Initial state for a run starting at `start`.
    pub fn initial(hydro: &HydroConfig, start: DateTime<Local>, step_minutes: u32) -> Self {
        Self {
            clock: Clock::new(start, step_minutes),
            reservoir_level_m3: hydro.max_reservoir_m3 * INITIAL_FILL,
            battery_soc: INITIAL_FILL,
            occupancy: Occupancy::default(),
        }
    }

    /// Index of the next step to run.
    pub fn step(&self) -> u64 {
        self.clock.step()
    }

    /// Simulated timestamp of the next step.
    pub fn current_time(&self) -> DateTime<Local> {
        self.clock.now()
    }
}
