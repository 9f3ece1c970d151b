//! Fixed-period simulation ticker
//!
//! A single driver fires once per second and scans the whole fleet; a device
//! is resampled only when its own sampling interval has elapsed. Devices not
//! yet due are left untouched, which gives every device an independent,
//! configurable refresh rate from one shared clock instead of N timers.
//!
//! All ticker state lives in this struct: it is created with the app and
//! dropped with it, so a torn-down view can never leave a stale timer map
//! behind. A fresh session has an empty sample map, which makes every device
//! immediately due on the first firing.

use crate::constants::sim::{DEFAULT_SAMPLING_INTERVAL_SECS, STEP_SCALE, TICK_PERIOD_MS};
use crate::model::{Device, DeviceId};
use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Result of one `poll` call
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    /// Devices that received a new sample on this firing
    pub sampled: Vec<DeviceId>,
}

impl TickOutcome {
    /// True when the device collection changed and should be republished
    pub fn any_sampled(&self) -> bool {
        !self.sampled.is_empty()
    }

    pub fn was_sampled(&self, id: &DeviceId) -> bool {
        self.sampled.iter().any(|s| s == id)
    }
}

/// Global simulation ticker with per-device cadence tracking
pub struct SimulationTicker {
    period: Duration,
    last_fire: Option<Instant>,
    last_sample: HashMap<DeviceId, Instant>,
}

impl Default for SimulationTicker {
    fn default() -> Self {
        Self::with_period(Duration::from_millis(TICK_PERIOD_MS))
    }
}

impl SimulationTicker {
    pub fn with_period(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            last_fire: None,
            last_sample: HashMap::new(),
        }
    }

    /// Advance the simulation if a full tick period has elapsed
    ///
    /// For each due device a new value is drawn from a bounded random walk:
    /// `max(0, value + uniform(-0.5, 0.5) * STEP_SCALE)`. Devices that are
    /// not due keep their value unchanged on this firing. Offline devices
    /// are simulated too; only alarm evaluation cares about status.
    pub fn poll<R: Rng>(
        &mut self,
        now: Instant,
        devices: &mut [Device],
        rng: &mut R,
    ) -> TickOutcome {
        profiling::scope!("ticker_poll");

        if let Some(last) = self.last_fire {
            if now.duration_since(last) < self.period {
                return TickOutcome::default();
            }
        }
        self.last_fire = Some(now);

        let mut outcome = TickOutcome::default();
        for device in devices.iter_mut() {
            let interval = effective_interval(device);
            let due = match self.last_sample.get(&device.id) {
                Some(last) => now.duration_since(*last) >= interval,
                // Never sampled this session: immediately due
                None => true,
            };
            if !due {
                continue;
            }

            let delta = rng.gen_range(-0.5..0.5) * STEP_SCALE;
            device.value = (device.value + delta).max(0.0);
            self.last_sample.insert(device.id.clone(), now);
            outcome.sampled.push(device.id.clone());
        }
        outcome
    }

    /// Forget cadence state for devices no longer in the fleet
    pub fn retain_devices(&mut self, devices: &[Device]) {
        self.last_sample
            .retain(|id, _| devices.iter().any(|d| &d.id == id));
    }
}

/// Sampling interval with the malformed-config fallback applied
///
/// `DeviceConfig` validation already rejects negatives and non-finite input;
/// a zero can still appear from a hand-edited store file.
fn effective_interval(device: &Device) -> Duration {
    let secs = device.config.sampling_interval_secs;
    let secs = if secs == 0 {
        DEFAULT_SAMPLING_INTERVAL_SECS
    } else {
        secs
    };
    Duration::from_secs(u64::from(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceConfig, DeviceStatus, Thresholds};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn device(id: &str, value: f64, interval_secs: u32) -> Device {
        Device {
            id: DeviceId::from(id),
            name: id.to_string(),
            unit: "m".to_string(),
            value,
            status: DeviceStatus::Online,
            thresholds: Thresholds::default(),
            config: DeviceConfig {
                sampling_interval_secs: interval_secs,
                ..DeviceConfig::default()
            },
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_first_poll_samples_everything() {
        let mut ticker = SimulationTicker::default();
        let mut devices = vec![device("a", 50.0, 10), device("b", 30.0, 60)];
        let outcome = ticker.poll(Instant::now(), &mut devices, &mut rng());
        assert_eq!(outcome.sampled.len(), 2);
    }

    #[test]
    fn test_cadence_respects_per_device_interval() {
        // Device with a 10s interval over 30 one-second ticks: the first
        // firing plus one resample per elapsed interval = 4 samples total.
        let mut ticker = SimulationTicker::default();
        let mut devices = vec![device("slow", 50.0, 10), device("fast", 50.0, 1)];
        let mut r = rng();

        let start = Instant::now();
        let mut slow_samples = 0;
        let mut fast_samples = 0;
        for k in 0..=30u64 {
            let now = start + Duration::from_millis(k * 1000);
            let outcome = ticker.poll(now, &mut devices, &mut r);
            if outcome.was_sampled(&DeviceId::from("slow")) {
                slow_samples += 1;
            }
            if outcome.was_sampled(&DeviceId::from("fast")) {
                fast_samples += 1;
            }
        }
        assert_eq!(slow_samples, 4);
        assert_eq!(fast_samples, 31);
    }

    #[test]
    fn test_not_due_devices_keep_their_value() {
        let mut ticker = SimulationTicker::default();
        let mut devices = vec![device("d", 50.0, 10)];
        let mut r = rng();
        let start = Instant::now();

        // First firing samples it
        ticker.poll(start, &mut devices, &mut r);
        let after_first = devices[0].value;

        // Ticks 1..=9 must not touch it; the 10th resamples
        for k in 1..=9u64 {
            let outcome = ticker.poll(start + Duration::from_millis(k * 1000), &mut devices, &mut r);
            assert!(!outcome.any_sampled(), "tick {} should be idle", k);
            assert_eq!(devices[0].value, after_first);
        }
        let outcome = ticker.poll(start + Duration::from_millis(10_000), &mut devices, &mut r);
        assert!(outcome.was_sampled(&DeviceId::from("d")));
    }

    #[test]
    fn test_walk_never_goes_negative() {
        let mut ticker = SimulationTicker::default();
        let mut devices = vec![device("d", 0.0, 1)];
        let mut r = rng();
        let start = Instant::now();
        for k in 0..500u64 {
            ticker.poll(start + Duration::from_millis(k * 1000), &mut devices, &mut r);
            assert!(devices[0].value >= 0.0);
        }
    }

    #[test]
    fn test_walk_step_is_bounded() {
        let mut ticker = SimulationTicker::default();
        let mut devices = vec![device("d", 50.0, 1)];
        let mut r = rng();
        let start = Instant::now();
        let mut prev = devices[0].value;
        for k in 0..200u64 {
            ticker.poll(start + Duration::from_millis(k * 1000), &mut devices, &mut r);
            let step = (devices[0].value - prev).abs();
            assert!(step <= 0.5 * STEP_SCALE + 1e-9, "step {} too large", step);
            prev = devices[0].value;
        }
    }

    #[test]
    fn test_sub_period_polls_are_ignored() {
        let mut ticker = SimulationTicker::default();
        let mut devices = vec![device("d", 50.0, 1)];
        let mut r = rng();
        let start = Instant::now();
        ticker.poll(start, &mut devices, &mut r);
        // Frame-rate polling between ticks must not fire
        for ms in [100u64, 300, 600, 900] {
            let outcome = ticker.poll(start + Duration::from_millis(ms), &mut devices, &mut r);
            assert!(!outcome.any_sampled());
        }
        let outcome = ticker.poll(start + Duration::from_millis(1000), &mut devices, &mut r);
        assert!(outcome.any_sampled());
    }

    #[test]
    fn test_zero_interval_falls_back_to_default() {
        let mut ticker = SimulationTicker::default();
        let mut devices = vec![device("d", 50.0, 0)];
        let mut r = rng();
        let start = Instant::now();
        ticker.poll(start, &mut devices, &mut r);

        // With the 10s fallback the next sample lands at t=10, not t=1
        let outcome = ticker.poll(start + Duration::from_millis(1000), &mut devices, &mut r);
        assert!(!outcome.any_sampled());
        let outcome = ticker.poll(start + Duration::from_millis(10_000), &mut devices, &mut r);
        assert!(outcome.any_sampled());
    }

    #[test]
    fn test_retain_devices_drops_stale_entries() {
        let mut ticker = SimulationTicker::default();
        let mut devices = vec![device("a", 50.0, 1), device("b", 50.0, 1)];
        let mut r = rng();
        ticker.poll(Instant::now(), &mut devices, &mut r);
        assert_eq!(ticker.last_sample.len(), 2);

        devices.remove(1);
        ticker.retain_devices(&devices);
        assert_eq!(ticker.last_sample.len(), 1);
        assert!(ticker.last_sample.contains_key(&DeviceId::from("a")));
    }
}
