//! Telemetry chart core: value domain math and threshold drag interaction
//!
//! Both pieces are UI-framework-free; `ui::chart` wires them to egui pointer
//! events and the painter.

mod domain;
mod drag;

pub use domain::ChartDomain;
pub use drag::{DragCommit, ThresholdDrag, ThresholdHandle};
