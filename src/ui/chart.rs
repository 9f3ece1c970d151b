//! Live telemetry chart with draggable threshold lines
//!
//! Hand-rolled on the egui painter: the value domain, the pixel mapping, and
//! the drag state machine live in `crate::chart`; this module only translates
//! pointer events and draws shapes.

use crate::chart::{ChartDomain, DragCommit, ThresholdDrag, ThresholdHandle};
use crate::model::{Thresholds, TimeSeriesPoint};
use chrono::{DateTime, Utc};
use egui::{Align2, Color32, CursorIcon, FontId, Pos2, Sense, Shape, Stroke, Vec2};

/// Series color when the device is in range
const SERIES_OK: Color32 = Color32::from_rgb(34, 211, 238); // Cyan
/// Series color while the displayed value is out of range
const SERIES_ALARM: Color32 = Color32::from_rgb(244, 63, 94); // Rose
/// Threshold line color
const THRESHOLD_COLOR: Color32 = Color32::from_rgb(244, 63, 94);
const GRID_COLOR: Color32 = Color32::from_rgb(51, 65, 85);
const BACKGROUND: Color32 = Color32::from_rgb(15, 23, 42);
const LABEL_COLOR: Color32 = Color32::from_rgb(100, 116, 139);

/// Render the chart and run the threshold drag interaction
///
/// Mid-drag threshold updates are written straight into `thresholds` so the
/// line tracks the pointer; the returned commit (present only on the frame a
/// drag ends) is the single value the caller persists.
pub fn render_chart(
    ui: &mut egui::Ui,
    points: &[TimeSeriesPoint],
    thresholds: &mut Thresholds,
    drag: &mut ThresholdDrag,
    unit: &str,
    alarm: bool,
) -> Option<DragCommit> {
    profiling::scope!("render_chart");

    let width = ui.available_width();
    let height = ui.available_height().max(crate::constants::layout::MIN_CHART_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(Vec2::new(width, height), Sense::click_and_drag());

    // Domain: frozen for the whole drag session, recomputed otherwise.
    let live_domain = ChartDomain::from_window(points.iter().map(|p| p.value), thresholds);
    let domain = drag.frozen_domain().unwrap_or(live_domain);

    let value_at = |pos: Pos2| -> f64 {
        domain.value_from_y(f64::from(pos.y - rect.top()), f64::from(rect.height()))
    };

    // --- Interaction ---
    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            drag.pointer_down(value_at(pos), thresholds, domain);
        }
    }
    if response.dragged() && drag.is_dragging() {
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some(updated) = drag.pointer_moved(value_at(pos)) {
                *thresholds = updated;
            }
        }
    }
    let commit = if response.drag_stopped() {
        drag.pointer_released()
    } else {
        None
    };

    if drag.is_dragging() {
        ui.ctx().set_cursor_icon(CursorIcon::ResizeVertical);
    }

    // --- Painting ---
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 8.0, BACKGROUND);

    let h = f64::from(rect.height());
    let y_px = |value: f64| rect.top() + domain.y_from_value(value, h) as f32;

    // Horizontal grid with value labels
    for i in 0..=4 {
        let value = domain.min + domain.range() * f64::from(i) / 4.0;
        let y = y_px(value);
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(0.5, GRID_COLOR.gamma_multiply(0.5)),
        );
        painter.text(
            Pos2::new(rect.left() + 4.0, y - 2.0),
            Align2::LEFT_BOTTOM,
            format!("{:.1}", value),
            FontId::monospace(9.0),
            LABEL_COLOR,
        );
    }

    // Timestamp extent for the x mapping
    let (ts_min, ts_max) = match (points.first(), points.last()) {
        (Some(first), Some(last)) if last.timestamp_ms > first.timestamp_ms => {
            (first.timestamp_ms, last.timestamp_ms)
        }
        (Some(only), _) => (only.timestamp_ms - 1, only.timestamp_ms),
        _ => (0, 1),
    };
    let ts_span = (ts_max - ts_min) as f64;
    let x_px = |ts: i64| rect.left() + ((ts - ts_min) as f64 / ts_span) as f32 * rect.width();

    // Data series
    let series_color = if alarm { SERIES_ALARM } else { SERIES_OK };
    let line: Vec<Pos2> = points
        .iter()
        .filter(|p| p.value.is_finite())
        .map(|p| Pos2::new(x_px(p.timestamp_ms), y_px(p.value)))
        .collect();
    if line.len() >= 2 {
        painter.add(Shape::line(line.clone(), Stroke::new(2.0, series_color)));
    } else if let Some(p) = line.first() {
        painter.circle_filled(*p, 3.0, series_color);
    }

    // Threshold lines (dashed, thicker while grabbed)
    for (handle, value, label) in [
        (ThresholdHandle::Min, thresholds.min, "Min"),
        (ThresholdHandle::Max, thresholds.max, "Max"),
    ] {
        let y = y_px(value);
        let grabbed = drag.active_handle() == Some(handle);
        let stroke = Stroke::new(if grabbed { 3.0 } else { 1.5 }, THRESHOLD_COLOR);
        painter.extend(Shape::dashed_line(
            &[Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            stroke,
            6.0,
            4.0,
        ));
        painter.text(
            Pos2::new(rect.left() + 4.0, y + 2.0),
            Align2::LEFT_TOP,
            format!("{}: {:.1}", label, value),
            FontId::proportional(10.0),
            THRESHOLD_COLOR,
        );
    }

    // Hover tooltip: nearest point, suppressed while dragging
    if !drag.is_dragging() {
        if let Some(pointer) = response.hover_pos() {
            let mut nearest: Option<(&TimeSeriesPoint, f64)> = None;
            for p in points {
                let dx = f64::from((x_px(p.timestamp_ms) - pointer.x) / rect.width());
                let dy = f64::from((y_px(p.value) - pointer.y) / rect.height());
                let dist = dx * dx + dy * dy;
                if nearest.map_or(true, |(_, best)| dist < best) {
                    nearest = Some((p, dist));
                }
            }
            if let Some((p, dist)) = nearest {
                if dist < 0.002 {
                    let marker = Pos2::new(x_px(p.timestamp_ms), y_px(p.value));
                    painter.circle_stroke(marker, 5.0, Stroke::new(1.5, Color32::WHITE));
                    let when = DateTime::<Utc>::from_timestamp_millis(p.timestamp_ms)
                        .map(|dt| dt.format("%H:%M:%S").to_string())
                        .unwrap_or_else(|| "--:--:--".to_string());
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        response.id.with("chart_tooltip"),
                        |ui| {
                            ui.label(format!("{:.2} {}", p.value, unit));
                            ui.weak(when);
                        },
                    );
                }
            }
        }
    }

    commit
}
