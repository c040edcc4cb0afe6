//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::devices::resort::{GUESTS_PER_STANDARD_ROOM, GUESTS_PER_SUITE};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline resort. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Hydro plant and reservoir parameters.
    #[serde(default)]
    pub hydro: HydroConfig,
    /// Battery storage parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Backup generator parameters.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Resort layout and load coefficients.
    #[serde(default)]
    pub resort: ResortConfig,
}

/// Simulation timing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Length of one timestep in minutes (must be > 0).
    pub time_step_minutes: u32,
    /// Number of days to simulate (must be > 0).
    pub num_days: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step_minutes: 15,
            num_days: 7,
        }
    }
}

/// Hydro plant and reservoir parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HydroConfig {
    /// Rated electrical output of the turbine (kW).
    pub max_turbine_kw: f64,
    /// Reservoir volume when full (m³).
    pub max_reservoir_m3: f64,
    /// Minimum operable reservoir volume (m³); no hydro power at or below it.
    pub min_reservoir_m3: f64,
    /// Mean natural inflow (m³/h).
    pub base_inflow_m3_per_hour: f64,
}

impl Default for HydroConfig {
    fn default() -> Self {
        Self {
            max_turbine_kw: 500.0,
            max_reservoir_m3: 100_000.0,
            min_reservoir_m3: 5_000.0,
            base_inflow_m3_per_hour: 150.0,
        }
    }
}

/// Battery storage parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Total energy capacity (kWh).
    pub capacity_kwh: f64,
    /// Maximum charging power (kW).
    pub max_charge_kw: f64,
    /// Maximum discharging power (kW).
    pub max_discharge_kw: f64,
    /// Efficiency applied on each direction, in (0.0, 1.0].
    pub round_trip_efficiency: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 1_000.0,
            max_charge_kw: 200.0,
            max_discharge_kw: 200.0,
            round_trip_efficiency: 0.9,
        }
    }
}

/// Backup generator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Rated output (kW).
    pub max_generator_kw: f64,
    /// Fuel cost per kWh generated.
    pub fuel_cost_per_kwh: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_generator_kw: 400.0,
            fuel_cost_per_kwh: 0.2,
        }
    }
}

/// Resort layout and load coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResortConfig {
    pub num_standard_rooms: u32,
    pub num_suite_rooms: u32,
    /// Load of one occupied standard room (kW).
    pub standard_room_kw: f64,
    /// Load of one occupied suite (kW).
    pub suite_room_kw: f64,
    pub restaurant_base_kw: f64,
    pub restaurant_kw_per_customer: f64,
    pub spa_base_kw: f64,
    pub spa_kw_per_customer: f64,
    pub lobby_base_kw: f64,
    pub lobby_kw_per_customer: f64,
}

impl Default for ResortConfig {
    fn default() -> Self {
        Self {
            num_standard_rooms: 20,
            num_suite_rooms: 5,
            standard_room_kw: 2.5,
            suite_room_kw: 4.0,
            restaurant_base_kw: 20.0,
            restaurant_kw_per_customer: 0.5,
            spa_base_kw: 10.0,
            spa_kw_per_customer: 0.7,
            lobby_base_kw: 8.0,
            lobby_kw_per_customer: 0.2,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"hydro.min_reservoir_m3"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Every validation failure found in a scenario.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", join_lines(.0))]
pub struct InvalidConfig(pub Vec<ConfigError>);

fn join_lines(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl ScenarioConfig {
    /// Returns the baseline resort scenario.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the small-plant preset: 200 kW turbine, 200 kWh battery, 150 kW generator.
    pub fn small_plant() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            hydro: HydroConfig {
                max_turbine_kw: 200.0,
                base_inflow_m3_per_hour: 120.0,
                ..HydroConfig::default()
            },
            battery: BatteryConfig {
                capacity_kwh: 200.0,
                max_charge_kw: 80.0,
                max_discharge_kw: 80.0,
                round_trip_efficiency: 0.9,
            },
            generator: GeneratorConfig {
                max_generator_kw: 150.0,
                ..GeneratorConfig::default()
            },
            resort: ResortConfig::default(),
        }
    }

    /// Returns the dry-season preset: weak inflow and a high minimum operating level.
    pub fn dry_season() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            hydro: HydroConfig {
                min_reservoir_m3: 45_000.0,
                base_inflow_m3_per_hour: 10.0,
                ..HydroConfig::default()
            },
            battery: BatteryConfig::default(),
            generator: GeneratorConfig {
                fuel_cost_per_kwh: 0.35,
                ..GeneratorConfig::default()
            },
            resort: ResortConfig {
                num_standard_rooms: 40,
                num_suite_rooms: 10,
                ..ResortConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "small_plant", "dry_season"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "small_plant" => Ok(Self::small_plant()),
            "dry_season" => Ok(Self::dry_season()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if s.time_step_minutes == 0 {
            errors.push(ConfigError::new("simulation.time_step_minutes", "must be > 0"));
        }
        if s.num_days == 0 {
            errors.push(ConfigError::new("simulation.num_days", "must be > 0"));
        }

        let h = &self.hydro;
        non_negative(&mut errors, "hydro.max_turbine_kw", h.max_turbine_kw);
        non_negative(&mut errors, "hydro.max_reservoir_m3", h.max_reservoir_m3);
        non_negative(&mut errors, "hydro.min_reservoir_m3", h.min_reservoir_m3);
        non_negative(
            &mut errors,
            "hydro.base_inflow_m3_per_hour",
            h.base_inflow_m3_per_hour,
        );
        if h.min_reservoir_m3 >= h.max_reservoir_m3 {
            errors.push(ConfigError::new(
                "hydro.min_reservoir_m3",
                "must be < hydro.max_reservoir_m3",
            ));
        }

        let b = &self.battery;
        if !(b.capacity_kwh.is_finite() && b.capacity_kwh > 0.0) {
            errors.push(ConfigError::new("battery.capacity_kwh", "must be > 0"));
        }
        non_negative(&mut errors, "battery.max_charge_kw", b.max_charge_kw);
        non_negative(&mut errors, "battery.max_discharge_kw", b.max_discharge_kw);
        if !(b.round_trip_efficiency > 0.0 && b.round_trip_efficiency <= 1.0) {
            errors.push(ConfigError::new(
                "battery.round_trip_efficiency",
                "must be in (0.0, 1.0]",
            ));
        }

        let g = &self.generator;
        non_negative(&mut errors, "generator.max_generator_kw", g.max_generator_kw);
        non_negative(&mut errors, "generator.fuel_cost_per_kwh", g.fuel_cost_per_kwh);

        let r = &self.resort;
        let guest_capacity = u64::from(r.num_standard_rooms) * u64::from(GUESTS_PER_STANDARD_ROOM)
            + u64::from(r.num_suite_rooms) * u64::from(GUESTS_PER_SUITE);
        if guest_capacity > u64::from(u32::MAX) {
            errors.push(ConfigError::new(
                "resort.num_standard_rooms",
                format!("rooms hold {guest_capacity} guests, more than {}", u32::MAX),
            ));
        }
        for (field, value) in [
            ("resort.standard_room_kw", r.standard_room_kw),
            ("resort.suite_room_kw", r.suite_room_kw),
            ("resort.restaurant_base_kw", r.restaurant_base_kw),
            ("resort.restaurant_kw_per_customer", r.restaurant_kw_per_customer),
            ("resort.spa_base_kw", r.spa_base_kw),
            ("resort.spa_kw_per_customer", r.spa_kw_per_customer),
            ("resort.lobby_base_kw", r.lobby_base_kw),
            ("resort.lobby_kw_per_customer", r.lobby_kw_per_customer),
        ] {
            non_negative(&mut errors, field, value);
        }

        errors
    }

    /// Validates the scenario as a single pass/fail result.
    ///
    /// # Errors
    ///
    /// Returns every [`ConfigError`] found, wrapped in [`InvalidConfig`].
    pub fn check(&self) -> Result<(), InvalidConfig> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(InvalidConfig(errors))
        }
    }
}

fn non_negative(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(ConfigError::new(field, "must be a finite value >= 0"));
    }
}
