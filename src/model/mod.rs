//! Device domain model
//!
//! Devices are owned by the persistence store; the application holds a
//! read/write working copy that the simulation ticker and the threshold
//! editors mutate. Alarm evaluation is a pure function over that copy.

mod config;
mod history;

pub use config::{ConfigPatch, DeviceConfig, DeviceConfigWire};
pub use history::History;

use serde::{Deserialize, Serialize};

/// Opaque stable device identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub String);

impl DeviceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        DeviceId(s.to_string())
    }
}

/// Device connectivity/operation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Maintenance,
}

impl Default for DeviceStatus {
    fn default() -> Self {
        DeviceStatus::Online
    }
}

/// Min/max alarm thresholds
///
/// `min < max` is expected but not enforced here; every consumer must stay
/// defined when the pair is inverted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min: f64,
    pub max: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { min: 20.0, max: 80.0 }
    }
}

/// A monitored sensor/asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub unit: String,
    /// Current scalar reading
    pub value: f64,
    #[serde(default)]
    pub status: DeviceStatus,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub config: DeviceConfig,
}

impl Device {
    /// Reading shown to the operator: raw value plus calibration offset
    pub fn displayed_value(&self) -> f64 {
        self.value + self.config.calibration_offset
    }

    /// Alarm evaluation (pure, re-run on every render)
    ///
    /// True iff the displayed value is strictly outside [min, max] and the
    /// device is not in maintenance. Stays defined for inverted thresholds:
    /// an inverted pair simply makes every value out of range.
    pub fn is_alarm(&self) -> bool {
        if self.status == DeviceStatus::Maintenance {
            return false;
        }
        let v = self.displayed_value();
        v < self.thresholds.min || v > self.thresholds.max
    }
}

/// One telemetry sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub value: f64,
    pub timestamp_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(value: f64, min: f64, max: f64, status: DeviceStatus, offset: f64) -> Device {
        Device {
            id: DeviceId::from("dev-1"),
            name: "Tank Level".to_string(),
            unit: "m".to_string(),
            value,
            status,
            thresholds: Thresholds { min, max },
            config: DeviceConfig {
                calibration_offset: offset,
                ..DeviceConfig::default()
            },
        }
    }

    #[test]
    fn test_alarm_within_range() {
        let d = device(50.0, 20.0, 80.0, DeviceStatus::Online, 0.0);
        assert!(!d.is_alarm());
    }

    #[test]
    fn test_alarm_outside_range() {
        assert!(device(10.0, 20.0, 80.0, DeviceStatus::Online, 0.0).is_alarm());
        assert!(device(90.0, 20.0, 80.0, DeviceStatus::Online, 0.0).is_alarm());
    }

    #[test]
    fn test_alarm_boundary_is_not_alarm() {
        // Strictly outside only
        assert!(!device(20.0, 20.0, 80.0, DeviceStatus::Online, 0.0).is_alarm());
        assert!(!device(80.0, 20.0, 80.0, DeviceStatus::Online, 0.0).is_alarm());
    }

    #[test]
    fn test_maintenance_suppresses_alarm() {
        let d = device(500.0, 20.0, 80.0, DeviceStatus::Maintenance, 0.0);
        assert!(!d.is_alarm());
    }

    #[test]
    fn test_calibration_offset_shifts_displayed_value() {
        // 79 + 2.5 = 81.5 > 80
        let d = device(79.0, 20.0, 80.0, DeviceStatus::Online, 2.5);
        assert_eq!(d.displayed_value(), 81.5);
        assert!(d.is_alarm());
    }

    #[test]
    fn test_inverted_thresholds_do_not_panic() {
        let d = device(50.0, 80.0, 20.0, DeviceStatus::Online, 0.0);
        // Everything is out of range, but evaluation stays defined
        assert!(d.is_alarm());
    }
}
