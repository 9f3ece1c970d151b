//! Threshold drag state machine
//!
//! States: `Idle` and `Dragging(handle)`. A press within the grab tolerance
//! of a threshold line starts a drag; every pointer move updates the
//! in-memory thresholds immediately (the line tracks the pointer); releasing
//! ends the drag and yields the committed pair exactly once.
//!
//! The chart domain is snapshotted at drag start and frozen until release.
//! Recomputing it mid-drag would shift the pixel-to-value mapping under the
//! pointer, which in turn moves the threshold, which shifts the domain again.

use crate::chart::ChartDomain;
use crate::constants::chart::{DRAG_VALUE_STEP, MIN_THRESHOLD_SEPARATION};
use crate::model::Thresholds;

/// Which threshold line a drag is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdHandle {
    Min,
    Max,
}

/// The single persistence write a finished drag session produces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragCommit {
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Copy)]
enum DragPhase {
    Idle,
    Dragging {
        handle: ThresholdHandle,
        domain: ChartDomain,
        moved: Thresholds,
    },
}

/// Drag controller for the two threshold lines
#[derive(Debug, Clone, Copy)]
pub struct ThresholdDrag {
    phase: DragPhase,
}

impl Default for ThresholdDrag {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
        }
    }
}

impl ThresholdDrag {
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn active_handle(&self) -> Option<ThresholdHandle> {
        match self.phase {
            DragPhase::Dragging { handle, .. } => Some(handle),
            DragPhase::Idle => None,
        }
    }

    /// Domain frozen for the duration of the active drag, if any
    pub fn frozen_domain(&self) -> Option<ChartDomain> {
        match self.phase {
            DragPhase::Dragging { domain, .. } => Some(domain),
            DragPhase::Idle => None,
        }
    }

    /// Pointer press at `pointer_value` (already mapped through `domain`)
    ///
    /// Grabs the handle whose value lies within the grab tolerance. When both
    /// qualify the nearer one wins; an exact tie prefers Max. Returns the
    /// grabbed handle, or None when the press missed both lines.
    pub fn pointer_down(
        &mut self,
        pointer_value: f64,
        thresholds: &Thresholds,
        domain: ChartDomain,
    ) -> Option<ThresholdHandle> {
        if self.is_dragging() {
            return self.active_handle();
        }
        let tolerance = domain.grab_tolerance();
        let dist_min = (pointer_value - thresholds.min).abs();
        let dist_max = (pointer_value - thresholds.max).abs();

        let handle = match (dist_min < tolerance, dist_max < tolerance) {
            (true, true) => {
                if dist_min < dist_max {
                    ThresholdHandle::Min
                } else {
                    ThresholdHandle::Max
                }
            }
            (true, false) => ThresholdHandle::Min,
            (false, true) => ThresholdHandle::Max,
            (false, false) => return None,
        };

        self.phase = DragPhase::Dragging {
            handle,
            domain,
            moved: *thresholds,
        };
        Some(handle)
    }

    /// Pointer move while dragging; returns the updated threshold pair
    ///
    /// The candidate value is rounded to the drag step and clamped so the
    /// pair keeps the minimum separation. No persistence happens here.
    pub fn pointer_moved(&mut self, pointer_value: f64) -> Option<Thresholds> {
        let DragPhase::Dragging { handle, domain, mut moved } = self.phase else {
            return None;
        };
        let rounded = (pointer_value / DRAG_VALUE_STEP).round() * DRAG_VALUE_STEP;
        match handle {
            ThresholdHandle::Min => {
                moved.min = rounded.min(moved.max - MIN_THRESHOLD_SEPARATION);
            }
            ThresholdHandle::Max => {
                moved.max = rounded.max(moved.min + MIN_THRESHOLD_SEPARATION);
            }
        }
        self.phase = DragPhase::Dragging {
            handle,
            domain,
            moved,
        };
        Some(moved)
    }

    /// Pointer release or pointer leaving the chart area
    ///
    /// Ends the drag session and yields the final pair exactly once; calling
    /// again without a new `pointer_down` returns None.
    pub fn pointer_released(&mut self) -> Option<DragCommit> {
        match self.phase {
            DragPhase::Dragging { moved, .. } => {
                self.phase = DragPhase::Idle;
                Some(DragCommit { thresholds: moved })
            }
            DragPhase::Idle => None,
        }
    }

    /// Abandon any in-flight drag without committing (view teardown)
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> ChartDomain {
        ChartDomain::from_window([10.0, 90.0], &Thresholds { min: 20.0, max: 80.0 })
    }

    fn thresholds() -> Thresholds {
        Thresholds { min: 20.0, max: 80.0 }
    }

    #[test]
    fn test_press_near_line_starts_drag() {
        let mut drag = ThresholdDrag::default();
        let grabbed = drag.pointer_down(21.0, &thresholds(), domain());
        assert_eq!(grabbed, Some(ThresholdHandle::Min));
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_press_far_from_lines_is_ignored() {
        let mut drag = ThresholdDrag::default();
        assert_eq!(drag.pointer_down(50.0, &thresholds(), domain()), None);
        assert!(!drag.is_dragging());
        assert_eq!(drag.pointer_released(), None);
    }

    #[test]
    fn test_nearer_handle_wins_when_both_in_tolerance() {
        // Narrow pair: both handles within tolerance of most presses
        let t = Thresholds { min: 49.0, max: 51.0 };
        let d = ChartDomain::from_window([0.0, 100.0], &t);

        let mut drag = ThresholdDrag::default();
        assert_eq!(drag.pointer_down(49.2, &t, d), Some(ThresholdHandle::Min));

        let mut drag = ThresholdDrag::default();
        assert_eq!(drag.pointer_down(50.8, &t, d), Some(ThresholdHandle::Max));

        // Exact midpoint ties prefer Max
        let mut drag = ThresholdDrag::default();
        assert_eq!(drag.pointer_down(50.0, &t, d), Some(ThresholdHandle::Max));
    }

    #[test]
    fn test_move_tracks_pointer_and_rounds() {
        let mut drag = ThresholdDrag::default();
        drag.pointer_down(79.0, &thresholds(), domain());
        let moved = drag.pointer_moved(40.07).unwrap();
        assert!((moved.max - 40.1).abs() < 1e-9);
        assert_eq!(moved.min, 20.0);
    }

    #[test]
    fn test_separation_is_enforced_both_ways() {
        let mut drag = ThresholdDrag::default();
        drag.pointer_down(79.0, &thresholds(), domain());
        // Drag max far below min
        let moved = drag.pointer_moved(5.0).unwrap();
        assert!((moved.max - (20.0 + MIN_THRESHOLD_SEPARATION)).abs() < 1e-9);

        let mut drag = ThresholdDrag::default();
        drag.pointer_down(21.0, &thresholds(), domain());
        // Drag min far above max
        let moved = drag.pointer_moved(95.0).unwrap();
        assert!((moved.min - (80.0 - MIN_THRESHOLD_SEPARATION)).abs() < 1e-9);
    }

    #[test]
    fn test_release_commits_final_value_exactly_once() {
        let mut drag = ThresholdDrag::default();
        drag.pointer_down(79.0, &thresholds(), domain());
        // Many intermediate moves, one commit with the final value
        for v in [70.0, 60.0, 50.0, 40.0] {
            drag.pointer_moved(v);
        }
        let commit = drag.pointer_released().expect("one commit");
        assert!((commit.thresholds.max - 40.0).abs() < 1e-9);
        assert_eq!(commit.thresholds.min, 20.0);

        assert_eq!(drag.pointer_released(), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_domain_is_frozen_during_drag() {
        let mut drag = ThresholdDrag::default();
        let d = domain();
        drag.pointer_down(79.0, &thresholds(), d);
        drag.pointer_moved(40.0);
        // The snapshot taken at drag start is still what renders use
        assert_eq!(drag.frozen_domain(), Some(d));
        drag.pointer_released();
        assert_eq!(drag.frozen_domain(), None);
    }

    #[test]
    fn test_cancel_discards_without_commit() {
        let mut drag = ThresholdDrag::default();
        drag.pointer_down(79.0, &thresholds(), domain());
        drag.pointer_moved(40.0);
        drag.cancel();
        assert_eq!(drag.pointer_released(), None);
    }

    #[test]
    fn test_redundant_pointer_down_keeps_session() {
        let mut drag = ThresholdDrag::default();
        drag.pointer_down(79.0, &thresholds(), domain());
        drag.pointer_moved(60.0);
        // A second press event mid-drag must not restart the session
        let handle = drag.pointer_down(60.0, &thresholds(), domain());
        assert_eq!(handle, Some(ThresholdHandle::Max));
        let commit = drag.pointer_released().unwrap();
        assert!((commit.thresholds.max - 60.0).abs() < 1e-9);
    }
}
