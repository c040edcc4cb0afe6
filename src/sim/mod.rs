/// Simulation clock mapping steps to simulated time.
pub mod clock;
pub mod dispatch;
pub mod engine;
pub mod kpi;
/// Mutable state carried between steps.
pub mod state;
pub mod types;
