//! Fleet working copy and selection

use crate::model::{Device, DeviceId};

/// In-memory copy of the device fleet
///
/// The store owns the durable state; this copy carries the live simulated
/// values between refreshes.
#[derive(Default)]
pub struct FleetState {
    pub devices: Vec<Device>,
    pub selected: Option<DeviceId>,
}

impl FleetState {
    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| &d.id == id)
    }

    pub fn device_mut(&mut self, id: &DeviceId) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| &d.id == id)
    }

    pub fn selected_device(&self) -> Option<&Device> {
        self.selected.as_ref().and_then(|id| self.device(id))
    }

    /// Replace the fleet from a store fetch, keeping live simulated values
    ///
    /// The store's value column lags the client-side simulation, so a plain
    /// replace would make every card jump backwards on refresh. Thresholds,
    /// config, and status always come from the store.
    pub fn replace_from_store(&mut self, fetched: Vec<Device>) {
        let mut merged = fetched;
        for device in merged.iter_mut() {
            if let Some(live) = self.device(&device.id) {
                device.value = live.value;
            }
        }
        self.devices = merged;

        // Drop a dangling selection
        if let Some(id) = &self.selected {
            if self.device(id).is_none() {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceConfig, DeviceStatus, Thresholds};

    fn device(id: &str, value: f64) -> Device {
        Device {
            id: DeviceId::from(id),
            name: id.to_string(),
            unit: "m".to_string(),
            value,
            status: DeviceStatus::Online,
            thresholds: Thresholds::default(),
            config: DeviceConfig::default(),
        }
    }

    #[test]
    fn test_replace_keeps_live_values() {
        let mut fleet = FleetState::default();
        fleet.devices = vec![device("a", 55.5)];

        let mut from_store = device("a", 50.0);
        from_store.thresholds = Thresholds { min: 1.0, max: 9.0 };
        fleet.replace_from_store(vec![from_store]);

        let a = fleet.device(&DeviceId::from("a")).unwrap();
        assert_eq!(a.value, 55.5);
        assert_eq!(a.thresholds, Thresholds { min: 1.0, max: 9.0 });
    }

    #[test]
    fn test_replace_clears_dangling_selection() {
        let mut fleet = FleetState::default();
        fleet.devices = vec![device("a", 1.0)];
        fleet.selected = Some(DeviceId::from("a"));

        fleet.replace_from_store(vec![device("b", 2.0)]);
        assert!(fleet.selected.is_none());
    }
}
