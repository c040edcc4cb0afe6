//! Physical models of the microgrid: demand, hydro, storage, and backup generation.

/// Time-of-day band lookups shared by the demand model.
pub mod bands;
/// Battery state-of-charge model.
pub mod battery;
/// Backup generator model.
pub mod generator;
/// Hydro plant and reservoir model.
pub mod reservoir;
/// Resort occupancy and demand model.
pub mod resort;

// Re-export the main types for convenience
pub use battery::Battery;
pub use generator::Generator;
pub use reservoir::Reservoir;
pub use resort::{Occupancy, ResortModel};
