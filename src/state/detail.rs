//! Device detail view state
//!
//! Owns the rolling history window, the threshold drag controller, and the
//! draft strings for the numeric threshold inputs. Created fresh when a
//! device is opened and cleared on the way out, so no live-view state can
//! outlast the view itself.

use crate::chart::ThresholdDrag;
use crate::constants::chart::MIN_THRESHOLD_SEPARATION;
use crate::model::{Device, History, Thresholds, TimeSeriesPoint};

/// Detail view tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Monitoring,
    History,
}

impl Default for DetailTab {
    fn default() -> Self {
        DetailTab::Monitoring
    }
}

/// Visible history window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    M5,
    M15,
    H1,
    H12,
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::M5
    }
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [TimeRange::M5, TimeRange::M15, TimeRange::H1, TimeRange::H12];

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::M5 => "5m",
            TimeRange::M15 => "15m",
            TimeRange::H1 => "1h",
            TimeRange::H12 => "12h",
        }
    }

    /// Oldest visible timestamp for a window ending at `now_ms`
    pub fn cutoff_ms(&self, now_ms: i64) -> i64 {
        let minutes = match self {
            TimeRange::M5 => 5,
            TimeRange::M15 => 15,
            TimeRange::H1 => 60,
            TimeRange::H12 => 720,
        };
        now_ms - minutes * 60 * 1000
    }
}

/// State behind the device detail view
#[derive(Default)]
pub struct DetailState {
    /// Rolling sample window for the live chart
    pub history: History,

    /// Threshold drag controller (chart interaction)
    pub drag: ThresholdDrag,

    /// Draft strings for the min/max inputs, decoupled from committed values
    pub min_draft: String,
    pub max_draft: String,

    /// Committed pair the drafts were last derived from
    draft_base: Thresholds,

    /// Working copies of config controls, committed on release/blur
    pub sampling_secs: u32,
    pub calibration: f64,
    pub heartbeat_secs: u32,

    pub time_range: TimeRange,

    pub tab: DetailTab,
}

impl DetailState {
    /// Initialize for a device, seeding history from a store fetch
    ///
    /// `fetched` arrives newest-first from the store and is reversed into
    /// ascending order here. An empty fetch seeds the window with the current
    /// value so the chart never starts blank.
    pub fn enter(&mut self, device: &Device, fetched: Vec<TimeSeriesPoint>, now_ms: i64) {
        if fetched.is_empty() {
            self.history.reset([TimeSeriesPoint {
                value: device.value,
                timestamp_ms: now_ms,
            }]);
        } else {
            self.history.reset(fetched.into_iter().rev());
        }
        self.drag.cancel();
        self.sync_drafts(device.thresholds);
        self.sampling_secs = device.config.sampling_interval_secs;
        self.calibration = device.config.calibration_offset;
        self.heartbeat_secs = device.config.heartbeat_secs;
        self.time_range = TimeRange::default();
        self.tab = DetailTab::default();
    }

    /// Tear down when leaving the view
    pub fn leave(&mut self) {
        self.history.clear();
        self.drag.cancel();
    }

    /// Reset the draft strings from a committed pair
    pub fn sync_drafts(&mut self, committed: Thresholds) {
        self.min_draft = format!("{:.1}", committed.min);
        self.max_draft = format!("{:.1}", committed.max);
        self.draft_base = committed;
    }

    /// Resync drafts when the committed pair changed elsewhere (drag, refresh)
    pub fn resync_drafts_if_stale(&mut self, committed: Thresholds) {
        if committed != self.draft_base {
            self.sync_drafts(committed);
        }
    }

    /// Parse and commit the draft strings
    ///
    /// Returns the pair to persist, or None when either draft fails to parse
    /// (the edit is ignored and the drafts snap back to the committed
    /// values). The committed pair always keeps the minimum separation.
    pub fn commit_drafts(&mut self) -> Option<Thresholds> {
        let parsed = (
            self.min_draft.trim().parse::<f64>(),
            self.max_draft.trim().parse::<f64>(),
        );
        match parsed {
            (Ok(min), Ok(max)) if min.is_finite() && max.is_finite() => {
                let min = min.min(max - MIN_THRESHOLD_SEPARATION);
                let committed = Thresholds { min, max };
                self.sync_drafts(committed);
                Some(committed)
            }
            _ => {
                self.sync_drafts(self.draft_base);
                None
            }
        }
    }

    /// Points inside the selected time window, oldest first
    pub fn visible_points(&self, now_ms: i64) -> Vec<TimeSeriesPoint> {
        let cutoff = self.time_range.cutoff_ms(now_ms);
        self.history
            .iter()
            .filter(|p| p.timestamp_ms >= cutoff)
            .copied()
            .collect()
    }
}
