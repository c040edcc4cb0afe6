use std::f64::consts::PI;

use crate::config::HydroConfig;
use crate::sim::types::SimConfig;

/// Water drawn through the turbine per kWh generated (m³/kWh).
pub const WATER_PER_KWH_M3: f64 = 0.1;

/// Relative amplitude of the daily inflow swing.
const INFLOW_DAILY_SWING: f64 = 0.2;

/// Hydro plant with a storage reservoir.
///
/// Available turbine power ramps linearly with reservoir fullness between the
/// minimum operable level and the full level. The reservoir level itself is
/// owned by the caller; every method takes and returns it explicitly.
#[derive(Debug, Clone)]
pub struct Reservoir {
    /// Rated turbine output (kW).
    pub max_turbine_kw: f64,
    /// Full reservoir volume (m³).
    pub max_reservoir_m3: f64,
    /// Minimum operable volume (m³).
    pub min_reservoir_m3: f64,
    /// Mean natural inflow (m³/h).
    pub base_inflow_m3_per_hour: f64,
    timing: SimConfig,
}

impl Reservoir {
    /// Creates a reservoir model from hydro parameters and simulation timing.
    pub fn new(config: &HydroConfig, timing: &SimConfig) -> Self {
        Self {
            max_turbine_kw: config.max_turbine_kw,
            max_reservoir_m3: config.max_reservoir_m3,
            min_reservoir_m3: config.min_reservoir_m3,
            base_inflow_m3_per_hour: config.base_inflow_m3_per_hour,
            timing: timing.clone(),
        }
    }

    /// Natural inflow during `step` (m³), following a sinusoidal daily pattern.
    pub fn inflow_m3(&self, step: u64) -> f64 {
        let hour = self.timing.hour_of_day(step);
        let daily_factor = 1.0 + INFLOW_DAILY_SWING * (2.0 * PI * hour / 24.0).sin();
        self.base_inflow_m3_per_hour * daily_factor * self.timing.dt_hours
    }

    /// Adds `inflow_m3` to `level_m3`; anything above the full level is lost.
    pub fn fill(&self, level_m3: f64, inflow_m3: f64) -> f64 {
        (level_m3 + inflow_m3).min(self.max_reservoir_m3)
    }

    /// Normalized level between the minimum operable and full volume (0.0 to 1.0).
    pub fn fullness(&self, level_m3: f64) -> f64 {
        let span = self.max_reservoir_m3 - self.min_reservoir_m3;
        ((level_m3 - self.min_reservoir_m3) / span).clamp(0.0, 1.0)
    }

    /// Turbine power the reservoir can support at `level_m3` (kW).
    ///
    /// Zero at or below the minimum operable level.
    pub fn available_power_kw(&self, level_m3: f64) -> f64 {
        if level_m3 <= self.min_reservoir_m3 {
            return 0.0;
        }
        self.fullness(level_m3) * self.max_turbine_kw
    }

    /// Level after running the turbine at `hydro_kw` for one step, floored at zero.
    pub fn draw_down(&self, level_m3: f64, hydro_kw: f64) -> f64 {
        let energy_kwh = hydro_kw * self.timing.dt_hours;
        (level_m3 - energy_kwh * WATER_PER_KWH_M3).max(0.0)
    }
}
