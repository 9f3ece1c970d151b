//! Device configuration, validated at the store boundary
//!
//! The wire shape (`DeviceConfigWire`) mirrors the loose nested objects the
//! upstream API sends: every field optional, nothing trusted. `DeviceConfig`
//! deserializes through the wire form (`#[serde(from)]`), so every load path
//! passes through `sanitize` and the rest of the application never sees a
//! malformed interval or a NaN offset.

use crate::constants::sim::*;
use serde::{Deserialize, Serialize};

/// Validated device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "DeviceConfigWire")]
pub struct DeviceConfig {
    /// How often this device receives a new sample (seconds, >= 1)
    pub sampling_interval_secs: u32,

    /// Offset added to the raw value before display/alarm evaluation
    pub calibration_offset: f64,

    /// Heartbeat interval (seconds)
    pub heartbeat_secs: u32,

    /// Hardware model label, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,

    /// Upstream ingest endpoint, if configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            sampling_interval_secs: DEFAULT_SAMPLING_INTERVAL_SECS,
            calibration_offset: 0.0,
            heartbeat_secs: DEFAULT_HEARTBEAT_SECS,
            hardware: None,
            endpoint: None,
        }
    }
}

/// Untrusted configuration as it arrives from the store
///
/// Accepts both the persisted field names and the loose upstream aliases
/// (`interval`, `heartbeat`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceConfigWire {
    #[serde(alias = "interval")]
    pub sampling_interval_secs: Option<f64>,
    pub calibration_offset: Option<f64>,
    #[serde(alias = "heartbeat")]
    pub heartbeat_secs: Option<f64>,
    pub hardware: Option<String>,
    pub endpoint: Option<String>,
}

impl DeviceConfigWire {
    /// Validate and default every field; never fails
    pub fn sanitize(self) -> DeviceConfig {
        DeviceConfig {
            sampling_interval_secs: sanitize_interval(
                self.sampling_interval_secs,
                DEFAULT_SAMPLING_INTERVAL_SECS,
            ),
            calibration_offset: self
                .calibration_offset
                .filter(|v| v.is_finite())
                .unwrap_or(0.0),
            heartbeat_secs: sanitize_interval(self.heartbeat_secs, DEFAULT_HEARTBEAT_SECS),
            hardware: self.hardware.filter(|s| !s.is_empty()),
            endpoint: self.endpoint.filter(|s| !s.is_empty()),
        }
    }
}

impl From<DeviceConfigWire> for DeviceConfig {
    fn from(wire: DeviceConfigWire) -> Self {
        wire.sanitize()
    }
}

/// Clamp a seconds value to a positive integer, falling back on garbage input
fn sanitize_interval(raw: Option<f64>, default: u32) -> u32 {
    match raw {
        Some(v) if v.is_finite() && v >= 1.0 => v.round() as u32,
        _ => default,
    }
}

/// Partial config update sent to the store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_interval_secs: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration_offset: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heartbeat_secs: Option<u32>,

    /// true moves the device into maintenance, false back to online
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<bool>,
}

impl ConfigPatch {
    pub fn sampling_interval(secs: u32) -> Self {
        Self {
            sampling_interval_secs: Some(secs),
            ..Self::default()
        }
    }

    pub fn calibration(offset: f64) -> Self {
        Self {
            calibration_offset: Some(offset),
            ..Self::default()
        }
    }

    pub fn heartbeat(secs: u32) -> Self {
        Self {
            heartbeat_secs: Some(secs),
            ..Self::default()
        }
    }

    pub fn maintenance(on: bool) -> Self {
        Self {
            maintenance: Some(on),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_defaults_missing_fields() {
        let cfg = DeviceConfigWire::default().sanitize();
        assert_eq!(cfg.sampling_interval_secs, DEFAULT_SAMPLING_INTERVAL_SECS);
        assert_eq!(cfg.calibration_offset, 0.0);
        assert_eq!(cfg.heartbeat_secs, DEFAULT_HEARTBEAT_SECS);
        assert!(cfg.hardware.is_none());
    }

    #[test]
    fn test_sanitize_rejects_bad_interval() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let cfg = DeviceConfigWire {
                sampling_interval_secs: Some(bad),
                ..Default::default()
            }
            .sanitize();
            assert_eq!(cfg.sampling_interval_secs, DEFAULT_SAMPLING_INTERVAL_SECS);
        }
    }

    #[test]
    fn test_sanitize_keeps_valid_values() {
        let cfg = DeviceConfigWire {
            sampling_interval_secs: Some(30.0),
            calibration_offset: Some(-1.5),
            heartbeat_secs: Some(600.0),
            hardware: Some("ESP32-S3".to_string()),
            endpoint: None,
        }
        .sanitize();
        assert_eq!(cfg.sampling_interval_secs, 30);
        assert_eq!(cfg.calibration_offset, -1.5);
        assert_eq!(cfg.heartbeat_secs, 600);
        assert_eq!(cfg.hardware.as_deref(), Some("ESP32-S3"));
    }

    #[test]
    fn test_sanitize_rejects_nan_offset() {
        let cfg = DeviceConfigWire {
            calibration_offset: Some(f64::NAN),
            ..Default::default()
        }
        .sanitize();
        assert_eq!(cfg.calibration_offset, 0.0);
    }

    #[test]
    fn test_deserialization_passes_through_sanitizer() {
        // Upstream alias names and garbage values in one payload
        let cfg: DeviceConfig =
            serde_json::from_str(r#"{"interval": 0, "heartbeat": -3, "calibration_offset": 1.5}"#)
                .unwrap();
        assert_eq!(cfg.sampling_interval_secs, DEFAULT_SAMPLING_INTERVAL_SECS);
        assert_eq!(cfg.heartbeat_secs, DEFAULT_HEARTBEAT_SECS);
        assert_eq!(cfg.calibration_offset, 1.5);
    }

    #[test]
    fn test_persisted_form_round_trips() {
        let cfg = DeviceConfig {
            sampling_interval_secs: 30,
            calibration_offset: -0.5,
            heartbeat_secs: 900,
            hardware: Some("ESP32-S3".to_string()),
            endpoint: None,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: DeviceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sampling_interval_secs, 30);
        assert_eq!(back.calibration_offset, -0.5);
        assert_eq!(back.heartbeat_secs, 900);
        assert_eq!(back.hardware.as_deref(), Some("ESP32-S3"));
    }
}
