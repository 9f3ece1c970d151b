//! Application state management
//!
//! This module organizes the FleetScope application state into focused
//! components: the fleet working copy, the per-device detail view state, and
//! UI interaction state.

mod detail;
mod fleet;
mod ui;

pub use detail::{DetailState, DetailTab, TimeRange};
pub use fleet::FleetState;
pub use ui::{ActiveView, UiState};

/// Main application state container
#[derive(Default)]
pub struct AppState {
    /// Working copy of the device fleet plus selection
    pub fleet: FleetState,

    /// Detail view state (history window, drafts, drag controller)
    pub detail: DetailState,

    /// UI interaction state
    pub ui: UiState,
}
