//! Persistence boundary
//!
//! The core talks to one narrow collaborator for everything durable. The
//! trait mirrors the upstream CRUD API contract; `JsonStore` is the
//! file-backed implementation used by the desktop build.

mod json;

pub use json::JsonStore;

use crate::error::Result;
use crate::model::{ConfigPatch, Device, DeviceId, Thresholds, TimeSeriesPoint};

/// Black-box persistence collaborator
///
/// `fetch_measurements` returns samples newest-first (the natural shape of a
/// `ORDER BY timestamp DESC LIMIT n` query); callers reverse into ascending
/// order before charting.
pub trait DeviceStore {
    fn fetch_devices(&self) -> Result<Vec<Device>>;

    fn fetch_measurements(&self, id: &DeviceId, limit: usize) -> Result<Vec<TimeSeriesPoint>>;

    fn update_thresholds(&mut self, id: &DeviceId, thresholds: Thresholds) -> Result<()>;

    fn update_config(&mut self, id: &DeviceId, patch: ConfigPatch) -> Result<()>;
}
