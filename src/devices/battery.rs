use crate::config::BatteryConfig;
use crate::sim::types::SimConfig;

/// A battery energy storage system charged from surplus hydro and discharged into the load.
///
/// `Battery` holds the battery's ratings. Its state of charge (SoC) is
/// owned by the simulation state and passed in explicitly.
///
/// # Power Flow Convention (Load)
/// - Positive power: Discharging (supplying the resort)
/// - Negative power: Charging (absorbing surplus hydro)
#[derive(Debug, Clone)]
pub struct Battery {
    /// Battery capacity in kilowatt-hours.
    pub capacity_kwh: f64,

    /// Maximum charge power in kilowatts (positive value).
    pub max_charge_kw: f64,

    /// Maximum discharge power in kilowatts (positive value).
    pub max_discharge_kw: f64,

    /// Efficiency applied on each direction (0..1.0].
    pub efficiency: f64,

    /// Duration of one timestep in hours.
    dt_hours: f64,
}

impl Battery {
    /// Creates a battery from its configured ratings.
    ///
    /// # Arguments
    ///
    /// * `config` - Battery ratings (capacity must be > 0, efficiency in (0, 1])
    /// * `timing` - Simulation configuration for timing
    pub fn new(config: &BatteryConfig, timing: &SimConfig) -> Self {
        Self {
            capacity_kwh: config.capacity_kwh,
            max_charge_kw: config.max_charge_kw,
            max_discharge_kw: config.max_discharge_kw,
            efficiency: config.round_trip_efficiency,
            dt_hours: timing.dt_hours,
        }
    }

    /// Duration of one timestep in hours.
    pub fn dt_hours(&self) -> f64 {
        self.dt_hours
    }

    /// Energy stored at `soc` (kWh).
    pub fn stored_kwh(&self, soc: f64) -> f64 {
        soc * self.capacity_kwh
    }

    /// Room left for charging at `soc` (kWh).
    pub fn free_kwh(&self, soc: f64) -> f64 {
        self.capacity_kwh * (1.0 - soc)
    }

    /// Returns the SoC after running at `battery_kw` for one step.
    ///
    /// Discharging removes `power × dt / efficiency` from storage; charging
    /// adds `|power| × dt × efficiency`. Stored energy is kept within
    /// `[0, capacity]` and the result within `[0.0, 1.0]`.
    ///
    /// # Arguments
    ///
    /// * `soc` - State of charge before the step
    /// * `battery_kw` - Net battery power (positive=discharge, negative=charge)
    pub fn apply(&self, soc: f64, battery_kw: f64) -> f64 {
        let mut stored_kwh = self.stored_kwh(soc);
        let delta_kwh = battery_kw * self.dt_hours;

        if delta_kwh > 0.0 {
            // Discharging: losses come out of storage
            stored_kwh = (stored_kwh - delta_kwh / self.efficiency).max(0.0);
        } else if delta_kwh < 0.0 {
            // Charging: only part of the drawn energy is stored
            stored_kwh = (stored_kwh - delta_kwh * self.efficiency).min(self.capacity_kwh);
        }

        (stored_kwh / self.capacity_kwh).clamp(0.0, 1.0)
    }
}
