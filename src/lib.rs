//! Hydro-powered resort microgrid simulator.

/// Scenario configuration, presets, and validation.
pub mod config;
pub mod devices;
pub mod io;
/// Simulation engine, dispatch, state, and KPI modules.
pub mod sim;
