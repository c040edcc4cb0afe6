//! Source dispatch: hydro first, then battery, then the generator.

use crate::devices::{Battery, Generator};

use super::types::DispatchResult;

/// Demand and resource availability for one step, fed to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchInput {
    /// Resort demand (kW, >= 0).
    pub demand_kw: f64,
    /// Hydro power the reservoir can support this step (kW, >= 0).
    pub available_hydro_kw: f64,
    /// Battery state of charge before the step (0.0 to 1.0).
    pub battery_soc: f64,
}

/// Allocates generation sources against demand for a single step.
///
/// Implementations must be pure: the same input always yields the same
/// result and no simulation state is touched.
pub trait Dispatcher {
    fn dispatch(&self, input: &DispatchInput) -> DispatchResult;
}

/// Fixed-priority greedy dispatch.
///
/// Hydro serves demand first and any hydro surplus charges the battery before
/// it is spilled. Remaining demand is served by battery discharge, then by the
/// generator; whatever is left is reported as unserved. The battery only ever
/// charges from hydro surplus, never from the generator.
#[derive(Debug, Clone)]
pub struct PriorityDispatch {
    battery: Battery,
    generator: Generator,
}

impl PriorityDispatch {
    pub fn new(battery: Battery, generator: Generator) -> Self {
        Self { battery, generator }
    }

    /// Routes `surplus_kw` of hydro into the battery.
    ///
    /// Returns `(battery_kw, spilled_kw)` with `battery_kw <= 0`.
    fn charge_from_surplus(&self, surplus_kw: f64, soc: f64) -> (f64, f64) {
        let b = &self.battery;
        let dt = b.dt_hours();

        let free_kwh = b.free_kwh(soc);
        if free_kwh <= 0.0 {
            return (0.0, surplus_kw);
        }

        // Energy that actually lands in storage
        let stored_kwh = free_kwh
            .min(b.max_charge_kw * dt)
            .min(surplus_kw * dt * b.efficiency);
        if stored_kwh <= 0.0 {
            return (0.0, surplus_kw);
        }

        let drawn_kw = stored_kwh / b.efficiency / dt;
        (-drawn_kw, (surplus_kw - drawn_kw).max(0.0))
    }

    /// Battery discharge (kW, >= 0) toward `remaining_kw`, limited by power and stored energy.
    fn discharge_toward(&self, remaining_kw: f64, soc: f64) -> f64 {
        let b = &self.battery;
        let dt = b.dt_hours();

        let possible_kwh = b.stored_kwh(soc).min(b.max_discharge_kw * dt);
        let discharge_kwh = (remaining_kw * dt).min(possible_kwh);
        if discharge_kwh <= 0.0 {
            return 0.0;
        }
        discharge_kwh / dt
    }
}

impl Dispatcher for PriorityDispatch {
    fn dispatch(&self, input: &DispatchInput) -> DispatchResult {
        let demand_kw = input.demand_kw.max(0.0);
        let available_hydro_kw = input.available_hydro_kw.max(0.0);
        let soc = input.battery_soc.clamp(0.0, 1.0);

        // 1. Hydro
        let hydro_kw = available_hydro_kw.min(demand_kw);
        let mut remaining_kw = demand_kw - hydro_kw;

        // 2. Hydro surplus into the battery, the rest is spilled
        let mut battery_kw = 0.0;
        let mut spilled_kw = 0.0;
        let surplus_kw = available_hydro_kw - hydro_kw;
        if surplus_kw > 0.0 {
            (battery_kw, spilled_kw) = self.charge_from_surplus(surplus_kw, soc);
        }

        // 3. Battery discharge
        if remaining_kw > 0.0 {
            let discharge_kw = self.discharge_toward(remaining_kw, soc);
            battery_kw += discharge_kw;
            remaining_kw -= discharge_kw;
        }

        // 4. Generator
        let mut generator_kw = 0.0;
        if remaining_kw > 0.0 {
            generator_kw = self.generator.output_kw(remaining_kw);
            remaining_kw -= generator_kw;
        }

        DispatchResult {
            available_hydro_kw,
            hydro_kw,
            battery_kw,
            generator_kw,
            spilled_kw,
            unserved_kw: remaining_kw.max(0.0),
        }
    }
}
