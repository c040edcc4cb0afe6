//! Core simulation types: timing configuration, dispatch outcome, and step records.

use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Minutes in one simulated day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Centralized timing configuration.
///
/// All models and the engine reference this struct for timing parameters,
/// eliminating duplicated `dt_hours` computations.
///
/// # Examples
///
/// ```
/// use hydro_resort_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(15, 1);
/// assert_eq!(cfg.dt_hours, 0.25);
/// assert_eq!(cfg.total_steps(), 96);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Length of one timestep in minutes.
    pub time_step_minutes: u32,
    /// Number of days to simulate.
    pub num_days: u32,
    /// Duration of one timestep in hours, derived as `time_step_minutes / 60`.
    pub dt_hours: f64,
}

impl SimConfig {
    /// Creates a new timing configuration.
    ///
    /// # Panics
    ///
    /// Panics if `time_step_minutes` or `num_days` is zero.
    pub fn new(time_step_minutes: u32, num_days: u32) -> Self {
        assert!(time_step_minutes > 0, "time_step_minutes must be > 0");
        assert!(num_days > 0, "num_days must be > 0");
        Self {
            time_step_minutes,
            num_days,
            dt_hours: f64::from(time_step_minutes) / 60.0,
        }
    }

    /// Total number of steps across all days, rounding a partial final step up.
    pub fn total_steps(&self) -> u64 {
        (u64::from(self.num_days) * u64::from(MINUTES_PER_DAY))
            .div_ceil(u64::from(self.time_step_minutes))
    }

    /// Hour of day (0.0 to 24.0, exclusive) at the start of `step`.
    pub fn hour_of_day(&self, step: u64) -> f64 {
        let minutes = (step * u64::from(self.time_step_minutes)) % u64::from(MINUTES_PER_DAY);
        minutes as f64 / 60.0
    }
}

/// Outcome of dispatching the sources against one step's demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DispatchResult {
    /// Hydro power the reservoir could have delivered this step (kW).
    pub available_hydro_kw: f64,
    /// Hydro power sent to the load (kW, >= 0).
    pub hydro_kw: f64,
    /// Net battery power (kW; positive=discharge, negative=charge).
    pub battery_kw: f64,
    /// Generator output (kW, between 0 and rated).
    pub generator_kw: f64,
    /// Available hydro neither consumed nor stored (kW, >= 0).
    pub spilled_kw: f64,
    /// Demand no source could meet (kW, >= 0).
    pub unserved_kw: f64,
}

impl DispatchResult {
    /// Battery power delivered to the load (kW, >= 0).
    pub fn discharge_kw(&self) -> f64 {
        self.battery_kw.max(0.0)
    }

    /// Grid-side power drawn into the battery (kW, >= 0).
    pub fn charge_kw(&self) -> f64 {
        (-self.battery_kw).max(0.0)
    }

    /// Hydro power left over once demand is met.
    pub fn surplus_hydro_kw(&self) -> f64 {
        self.available_hydro_kw - self.hydro_kw
    }
}

/// Resort occupancy and demand breakdown for one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResortSnapshot {
    /// Total resort demand (kW).
    pub demand_kw: f64,
    pub room_kw: f64,
    pub restaurant_kw: f64,
    pub spa_kw: f64,
    pub lobby_kw: f64,
    pub standard_rooms_occupied: u32,
    pub suite_rooms_occupied: u32,
    pub restaurant_customers: u32,
    pub spa_customers: u32,
    pub lobby_customers: u32,
    pub total_guests: u32,
    /// Hour of day the snapshot was taken at.
    pub hour: f64,
}

/// Complete record of one simulation step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// Step index.
    pub step: u64,
    /// Simulated timestamp at the start of the step.
    pub time: DateTime<Local>,
    /// Resort demand (kW).
    pub demand_kw: f64,
    pub available_hydro_kw: f64,
    pub hydro_kw: f64,
    /// Net battery power (kW; positive=discharge, negative=charge).
    pub battery_kw: f64,
    pub generator_kw: f64,
    pub spilled_kw: f64,
    pub unserved_kw: f64,
    /// Battery SoC after this step (0.0 to 1.0).
    pub battery_soc: f64,
    /// Reservoir volume after this step (m³).
    pub reservoir_level_m3: f64,
    /// Resort breakdown behind `demand_kw`.
    pub resort: ResortSnapshot,
}

impl StepRecord {
    /// Dispatch figures carried by this record.
    pub fn dispatch(&self) -> DispatchResult {
        DispatchResult {
            available_hydro_kw: self.available_hydro_kw,
            hydro_kw: self.hydro_kw,
            battery_kw: self.battery_kw,
            generator_kw: self.generator_kw,
            spilled_kw: self.spilled_kw,
            unserved_kw: self.unserved_kw,
        }
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>4} ({}) | demand={:>7.2} kW | hydro={:>7.2}/{:<7.2} kW  \
             bat={:>7.2} kW (SoC={:.1}%)  gen={:>7.2} kW | spill={:.2}  unserved={:.2} | \
             reservoir={:.0} m³  guests={}",
            self.step,
            self.time.format("%Y-%m-%d %H:%M"),
            self.demand_kw,
            self.hydro_kw,
            self.available_hydro_kw,
            self.battery_kw,
            self.battery_soc * 100.0,
            self.generator_kw,
            self.spilled_kw,
            self.unserved_kw,
            self.reservoir_level_m3,
            self.resort.total_guests,
        )
    }
}
