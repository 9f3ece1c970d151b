//! Application-wide constants and default values
//!
//! This module centralizes all magic numbers and default values used throughout
//! the application, making them easier to maintain and configure.

/// Telemetry simulation defaults
pub mod sim {
    /// Global ticker period in milliseconds (one shared driver for all devices)
    pub const TICK_PERIOD_MS: u64 = 1000;

    /// Fallback sampling interval when device config is malformed (seconds)
    pub const DEFAULT_SAMPLING_INTERVAL_SECS: u32 = 10;

    /// Maximum configurable sampling interval (seconds)
    pub const MAX_SAMPLING_INTERVAL_SECS: u32 = 60;

    /// Amplitude of the bounded random walk: delta = uniform(-0.5, 0.5) * STEP_SCALE
    pub const STEP_SCALE: f64 = 0.8;

    /// Default heartbeat interval (seconds)
    pub const DEFAULT_HEARTBEAT_SECS: u32 = 1800;
}

/// Chart domain and interaction defaults
pub mod chart {
    /// Fraction of the data span added above and below the domain
    pub const DOMAIN_PADDING_FRACTION: f64 = 0.3;

    /// Padding floor applied when the data span is degenerate or zero
    pub const DOMAIN_PADDING_FLOOR: f64 = 2.0;

    /// Fraction of the domain range within which a press grabs a threshold line
    pub const GRAB_TOLERANCE_FRACTION: f64 = 0.15;

    /// Minimum separation enforced between min and max thresholds
    pub const MIN_THRESHOLD_SEPARATION: f64 = 0.5;

    /// Dragged threshold values are rounded to this step
    pub const DRAG_VALUE_STEP: f64 = 0.1;
}

/// History window defaults
pub mod history {
    /// Rolling window capacity per device
    pub const WINDOW_CAPACITY: usize = 100;

    /// Points arriving closer than this to the newest one are dropped
    pub const DEDUP_WINDOW_MS: i64 = 500;

    /// How many persisted measurements the detail view fetches on entry
    pub const FETCH_LIMIT: usize = 100;
}

/// Persistence store defaults
pub mod store {
    /// Fleet store file name (JSON)
    pub const STORE_FILE: &str = "fleet-scope.json";
}

/// UI layout defaults
pub mod layout {
    /// Minimum chart height
    pub const MIN_CHART_HEIGHT: f32 = 240.0;

    /// Detail control panel width
    pub const CONTROL_PANEL_WIDTH: f32 = 280.0;

    /// Fleet card width (cards wrap into a grid)
    pub const FLEET_CARD_WIDTH: f32 = 260.0;

    /// History table row height
    pub const HISTORY_ROW_HEIGHT: f32 = 22.0;

    /// Standard UI element padding
    pub const STANDARD_PADDING: f32 = 10.0;
}
