//! Reusable UI widgets

mod threshold_input;

pub use threshold_input::ThresholdInput;
