//! JSON-file-backed device store
//!
//! Holds the fleet in memory and writes the whole file through on every
//! mutation. A missing or unreadable file starts from the seeded demo fleet
//! so the application is usable out of the box.

use crate::error::{FleetError, Result};
use crate::model::{
    ConfigPatch, Device, DeviceConfig, DeviceId, DeviceStatus, Thresholds, TimeSeriesPoint,
};
use crate::store::DeviceStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// On-disk layout of the store file
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    devices: Vec<Device>,
    /// Per-device persisted samples, newest-first
    #[serde(default)]
    measurements: HashMap<String, Vec<TimeSeriesPoint>>,
}

/// File-backed implementation of [`DeviceStore`]
pub struct JsonStore {
    path: Option<PathBuf>,
    file: StoreFile,
}

impl JsonStore {
    /// Open a store file, seeding the demo fleet when it does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            log::info!("store file {:?} missing, seeding demo fleet", path);
            StoreFile {
                devices: demo_fleet(),
                measurements: HashMap::new(),
            }
        };
        let mut store = Self {
            path: Some(path),
            file,
        };
        store.save()?;
        Ok(store)
    }

    /// In-memory store (tests, ephemeral sessions)
    pub fn in_memory() -> Self {
        Self {
            path: None,
            file: StoreFile {
                devices: demo_fleet(),
                measurements: HashMap::new(),
            },
        }
    }

    fn save(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            let json = serde_json::to_string_pretty(&self.file)?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }

    fn device_mut(&mut self, id: &DeviceId) -> Result<&mut Device> {
        self.file
            .devices
            .iter_mut()
            .find(|d| &d.id == id)
            .ok_or_else(|| FleetError::DeviceNotFound { id: id.to_string() })
    }
}

impl DeviceStore for JsonStore {
    fn fetch_devices(&self) -> Result<Vec<Device>> {
        Ok(self.file.devices.clone())
    }

    fn fetch_measurements(&self, id: &DeviceId, limit: usize) -> Result<Vec<TimeSeriesPoint>> {
        let points = self
            .file
            .measurements
            .get(id.as_str())
            .map(|m| m.iter().take(limit).copied().collect())
            .unwrap_or_default();
        Ok(points)
    }

    fn update_thresholds(&mut self, id: &DeviceId, thresholds: Thresholds) -> Result<()> {
        self.device_mut(id)?.thresholds = thresholds;
        self.save()
    }

    fn update_config(&mut self, id: &DeviceId, patch: ConfigPatch) -> Result<()> {
        let device = self.device_mut(id)?;
        if let Some(secs) = patch.sampling_interval_secs {
            device.config.sampling_interval_secs = secs.max(1);
        }
        if let Some(offset) = patch.calibration_offset {
            if offset.is_finite() {
                device.config.calibration_offset = offset;
            }
        }
        if let Some(secs) = patch.heartbeat_secs {
            device.config.heartbeat_secs = secs.max(1);
        }
        if let Some(maintenance) = patch.maintenance {
            device.status = if maintenance {
                DeviceStatus::Maintenance
            } else {
                DeviceStatus::Online
            };
        }
        self.save()
    }
}

/// Seeded simulated fleet used when no store file exists yet
fn demo_fleet() -> Vec<Device> {
    let mk = |id: &str, name: &str, unit: &str, value: f64, min: f64, max: f64, interval: u32| {
        Device {
            id: DeviceId::from(id),
            name: name.to_string(),
            unit: unit.to_string(),
            value,
            status: DeviceStatus::Online,
            thresholds: Thresholds { min, max },
            config: DeviceConfig {
                sampling_interval_secs: interval,
                hardware: Some("ESP32-S3".to_string()),
                ..DeviceConfig::default()
            },
        }
    };
    vec![
        mk("ESP32S3-001001", "Tank Level North", "m", 4.2, 1.0, 8.0, 5),
        mk("ESP32S3-001002", "Pump House Pressure", "bar", 3.1, 1.5, 5.5, 10),
        mk("ESP32S3-001003", "Cold Room Temp", "°C", 4.8, 2.0, 8.0, 15),
        mk("ESP32S3-001004", "Flow Meter East", "L/min", 52.0, 20.0, 80.0, 10),
    ]
}
