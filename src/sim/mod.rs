//! Telemetry simulation
//!
//! One global ticker advances every device from a shared clock, each at its
//! own sampling cadence.

mod ticker;

pub use ticker::{SimulationTicker, TickOutcome};
