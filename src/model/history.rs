//! Bounded rolling window of telemetry samples

use crate::constants::history::{DEDUP_WINDOW_MS, WINDOW_CAPACITY};
use crate::model::TimeSeriesPoint;
use std::collections::VecDeque;

/// Fixed-capacity, timestamp-ascending sample window
///
/// Appending past capacity evicts the oldest point; samples arriving within
/// the dedup window of the newest point are dropped (the ticker and a
/// history refetch can otherwise produce near-duplicate samples).
#[derive(Debug, Clone)]
pub struct History {
    points: VecDeque<TimeSeriesPoint>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    /// Replace the window contents with a fetched batch, oldest first
    pub fn reset(&mut self, ascending: impl IntoIterator<Item = TimeSeriesPoint>) {
        self.points.clear();
        for p in ascending {
            self.push(p);
        }
    }

    /// Append a sample, evicting the oldest point past capacity
    ///
    /// Returns false when the sample was dropped as a near-duplicate.
    pub fn push(&mut self, point: TimeSeriesPoint) -> bool {
        if let Some(last) = self.points.back() {
            if (point.timestamp_ms - last.timestamp_ms).abs() < DEDUP_WINDOW_MS {
                return false;
            }
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
        true
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn latest(&self) -> Option<&TimeSeriesPoint> {
        self.points.back()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &TimeSeriesPoint> {
        self.points.iter()
    }

    /// Values oldest to newest (for domain computation)
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}
