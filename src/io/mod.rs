/// CSV telemetry and run metadata export.
pub mod export;
