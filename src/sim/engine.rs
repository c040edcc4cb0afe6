//! Simulation engine that orchestrates the resort, reservoir, battery, and dispatch.

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::config::{InvalidConfig, ScenarioConfig};
use crate::devices::{Battery, Generator, Reservoir, ResortModel};

use super::dispatch::{DispatchInput, Dispatcher, PriorityDispatch};
use super::state::SimState;
use super::types::{SimConfig, StepRecord};

/// Simulation engine owning the models, the dispatcher, and the mutable state.
///
/// Generic over `D: Dispatcher` for static dispatch. The engine is the only
/// writer of [`SimState`]; callers observe it through [`Engine::state`] and
/// the returned [`StepRecord`]s.
pub struct Engine<D: Dispatcher = PriorityDispatch> {
    scenario: ScenarioConfig,
    config: SimConfig,
    resort: ResortModel,
    reservoir: Reservoir,
    battery: Battery,
    dispatcher: D,
    state: SimState,
}

impl Engine<PriorityDispatch> {
    /// Creates an engine with the fixed-priority dispatcher, starting now.
    ///
    /// # Errors
    ///
    /// Returns every validation failure if the scenario is invalid; no engine
    /// is created in that case.
    pub fn new(scenario: ScenarioConfig) -> Result<Self, InvalidConfig> {
        Self::starting_at(scenario, Local::now())
    }

    /// Creates an engine with the fixed-priority dispatcher and an explicit start time.
    ///
    /// # Errors
    ///
    /// Returns every validation failure if the scenario is invalid.
    pub fn starting_at(
        scenario: ScenarioConfig,
        start: DateTime<Local>,
    ) -> Result<Self, InvalidConfig> {
        scenario.check()?;
        let config = timing(&scenario);
        let dispatcher = PriorityDispatch::new(
            Battery::new(&scenario.battery, &config),
            Generator::new(&scenario.generator),
        );
        Self::with_dispatcher(scenario, dispatcher, start)
    }
}

impl<D: Dispatcher> Engine<D> {
    /// Creates an engine driven by a custom dispatcher.
    ///
    /// # Arguments
    ///
    /// * `scenario` - Scenario configuration, validated here
    /// * `dispatcher` - Dispatch rule applied at every step
    /// * `start` - Simulated timestamp of step 0
    ///
    /// # Errors
    ///
    /// Returns every validation failure if the scenario is invalid.
    pub fn with_dispatcher(
        scenario: ScenarioConfig,
        dispatcher: D,
        start: DateTime<Local>,
    ) -> Result<Self, InvalidConfig> {
        scenario.check()?;
        let config = timing(&scenario);
        let state = SimState::initial(&scenario.hydro, start, config.time_step_minutes);

        info!(
            time_step_minutes = config.time_step_minutes,
            num_days = config.num_days,
            total_steps = config.total_steps(),
            "engine created"
        );

        Ok(Self {
            resort: ResortModel::new(&scenario.resort, &config),
            reservoir: Reservoir::new(&scenario.hydro, &config),
            battery: Battery::new(&scenario.battery, &config),
            dispatcher,
            state,
            config,
            scenario,
        })
    }

    /// Returns the state to its initial values, with simulated time starting now.
    pub fn reset(&mut self) {
        self.reset_at(Local::now());
    }

    /// Returns the state to its initial values, with simulated time starting at `start`.
    ///
    /// Configuration is kept; only the state is rebuilt.
    pub fn reset_at(&mut self, start: DateTime<Local>) {
        self.state =
            SimState::initial(&self.scenario.hydro, start, self.config.time_step_minutes);
        info!(start = %start, "simulation reset");
    }

    /// Executes one simulation step and returns its record.
    ///
    /// # Returns
    ///
    /// A `StepRecord` capturing demand, the dispatch outcome, and the
    /// reservoir level and SoC after the step.
    pub fn step(&mut self) -> StepRecord {
        let state = &mut self.state;
        let step = state.clock.step();

        // 1. Resort demand
        let resort = self.resort.step(step, &mut state.occupancy);
        let demand_kw = resort.demand_kw;

        // 2. Reservoir inflow
        let inflow_m3 = self.reservoir.inflow_m3(step);
        state.reservoir_level_m3 = self.reservoir.fill(state.reservoir_level_m3, inflow_m3);

        // 3. Hydro availability
        let available_hydro_kw = self.reservoir.available_power_kw(state.reservoir_level_m3);

        // 4. Dispatch
        let dispatch = self.dispatcher.dispatch(&DispatchInput {
            demand_kw,
            available_hydro_kw,
            battery_soc: state.battery_soc,
        });

        // 5. Apply dispatch to battery and reservoir
        state.battery_soc = self.battery.apply(state.battery_soc, dispatch.battery_kw);
        state.reservoir_level_m3 = self
            .reservoir
            .draw_down(state.reservoir_level_m3, dispatch.hydro_kw);

        debug!(
            step,
            demand_kw,
            hydro_kw = dispatch.hydro_kw,
            battery_kw = dispatch.battery_kw,
            generator_kw = dispatch.generator_kw,
            spilled_kw = dispatch.spilled_kw,
            soc = state.battery_soc,
            reservoir_m3 = state.reservoir_level_m3,
            "step dispatched"
        );
        if dispatch.unserved_kw > 0.0 {
            debug!(step, unserved_kw = dispatch.unserved_kw, "demand not met");
        }

        // 6. Build record and advance time
        let (_, time) = state.clock.tick();

        StepRecord {
            step,
            time,
            demand_kw,
            available_hydro_kw: dispatch.available_hydro_kw,
            hydro_kw: dispatch.hydro_kw,
            battery_kw: dispatch.battery_kw,
            generator_kw: dispatch.generator_kw,
            spilled_kw: dispatch.spilled_kw,
            unserved_kw: dispatch.unserved_kw,
            battery_soc: state.battery_soc,
            reservoir_level_m3: state.reservoir_level_m3,
            resort,
        }
    }

    /// Executes `n` steps from the current state.
    pub fn run_steps(&mut self, n: u64) -> Vec<StepRecord> {
        (0..n).map(|_| self.step()).collect()
    }

    /// Executes the configured horizon from the current state and returns every record.
    pub fn run(&mut self) -> Vec<StepRecord> {
        let total = self.config.total_steps();
        let records = self.run_steps(total);
        info!(steps = records.len(), "run complete");
        records
    }

    /// Returns the current simulation state.
    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Returns the timing configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Returns the scenario the engine was built from.
    pub fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }
}

fn timing(scenario: &ScenarioConfig) -> SimConfig {
    SimConfig::new(
        scenario.simulation.time_step_minutes,
        scenario.simulation.num_days,
    )
}
