//! Chart value domain and the pixel <-> value mapping
//!
//! The domain spans the visible data window AND both thresholds, padded by a
//! fraction of that span so a threshold sitting at the data extreme still has
//! room to be grabbed and dragged without clipping off-chart.

use crate::constants::chart::{
    DOMAIN_PADDING_FLOOR, DOMAIN_PADDING_FRACTION, GRAB_TOLERANCE_FRACTION,
};
use crate::model::Thresholds;

/// Value range mapped onto the chart's vertical pixel extent
///
/// Invariant: `max > min` always; the padding floor keeps the range open even
/// for a degenerate (single-value or empty) data window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDomain {
    pub min: f64,
    pub max: f64,
}

impl ChartDomain {
    /// Compute the domain from the visible values and the current thresholds
    pub fn from_window(values: impl IntoIterator<Item = f64>, thresholds: &Thresholds) -> Self {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in values {
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        for t in [thresholds.min, thresholds.max] {
            if t.is_finite() {
                lo = lo.min(t);
                hi = hi.max(t);
            }
        }
        // Nothing finite at all: fall back to a unit window around zero
        if lo > hi {
            lo = 0.0;
            hi = 0.0;
        }

        let span = hi - lo;
        let mut padding = span * DOMAIN_PADDING_FRACTION;
        if !padding.is_finite() || padding <= 0.0 {
            padding = DOMAIN_PADDING_FLOOR;
        }
        Self {
            min: lo - padding,
            max: hi + padding,
        }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Forward map: data value to vertical pixel offset from the chart top
    pub fn y_from_value(&self, value: f64, height: f64) -> f64 {
        height - (value - self.min) / self.range() * height
    }

    /// Inverse map: vertical pixel offset from the chart top to data value
    pub fn value_from_y(&self, y: f64, height: f64) -> f64 {
        self.min + (height - y) / height * self.range()
    }

    /// Vertical band (in value units) within which a press grabs a threshold
    pub fn grab_tolerance(&self) -> f64 {
        self.range() * GRAB_TOLERANCE_FRACTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds(min: f64, max: f64) -> Thresholds {
        Thresholds { min, max }
    }

    #[test]
    fn test_domain_covers_data_and_thresholds() {
        let d = ChartDomain::from_window([10.0, 90.0], &thresholds(20.0, 80.0));
        // Span [10, 90] padded by 30%: 24 units each side
        assert!((d.min - (10.0 - 24.0)).abs() < 1e-9);
        assert!((d.max - (90.0 + 24.0)).abs() < 1e-9);
        assert!(d.min <= 20.0 && 80.0 <= d.max);
    }

    #[test]
    fn test_thresholds_extend_the_span() {
        let d = ChartDomain::from_window([40.0, 60.0], &thresholds(0.0, 100.0));
        assert!(d.min < 0.0);
        assert!(d.max > 100.0);
    }

    #[test]
    fn test_degenerate_window_gets_padding_floor() {
        let d = ChartDomain::from_window([50.0], &thresholds(50.0, 50.0));
        assert!(d.max > d.min);
        assert!((d.range() - 2.0 * DOMAIN_PADDING_FLOOR).abs() < 1e-9);
    }

    #[test]
    fn test_empty_window_stays_defined() {
        let d = ChartDomain::from_window(std::iter::empty(), &thresholds(f64::NAN, f64::NAN));
        assert!(d.max > d.min);
        assert!(d.range().is_finite());
    }

    #[test]
    fn test_round_trip_mapping() {
        let d = ChartDomain::from_window([10.0, 90.0], &thresholds(20.0, 80.0));
        let height = 320.0;
        let mut v = d.min;
        while v <= d.max {
            let y = d.y_from_value(v, height);
            let back = d.value_from_y(y, height);
            assert!((back - v).abs() < 1e-9, "round trip failed at {}", v);
            v += d.range() / 37.0;
        }
    }

    #[test]
    fn test_mapping_orientation() {
        // Larger values sit nearer the chart top (smaller y)
        let d = ChartDomain::from_window([0.0, 100.0], &thresholds(20.0, 80.0));
        let height = 100.0;
        assert!(d.y_from_value(90.0, height) < d.y_from_value(10.0, height));
        assert!((d.y_from_value(d.max, height) - 0.0).abs() < 1e-9);
        assert!((d.y_from_value(d.min, height) - height).abs() < 1e-9);
    }
}
