//! UI rendering modules
//!
//! Render functions read and mutate `AppState` and report store-affecting
//! actions back to the app, which owns the persistence collaborator.

pub mod chart;
pub mod detail;
pub mod fleet_panel;
mod history_table;
