//! Measurement history table (newest first)

use crate::constants::layout::HISTORY_ROW_HEIGHT;
use crate::model::{Device, TimeSeriesPoint};
use chrono::{DateTime, Utc};
use egui::{Color32, RichText};
use egui_extras::{Column, TableBuilder};

pub fn render_history_table(
    ui: &mut egui::Ui,
    device: &Device,
    points: &[TimeSeriesPoint],
) {
    profiling::scope!("render_history_table");

    // Newest rows on top
    let rows: Vec<&TimeSeriesPoint> = points.iter().rev().collect();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Timestamp");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
            header.col(|ui| {
                ui.strong("State");
            });
        })
        .body(|body| {
            body.rows(HISTORY_ROW_HEIGHT, rows.len(), |mut row| {
                let point = rows[row.index()];
                let out = point.value < device.thresholds.min || point.value > device.thresholds.max;
                row.col(|ui| {
                    let when = DateTime::<Utc>::from_timestamp_millis(point.timestamp_ms)
                        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|| "-".to_string());
                    ui.monospace(when);
                });
                row.col(|ui| {
                    let color = if out {
                        Color32::from_rgb(244, 63, 94)
                    } else {
                        Color32::from_rgb(34, 211, 238)
                    };
                    ui.label(
                        RichText::new(format!("{:.2} {}", point.value, device.unit)).color(color),
                    );
                });
                row.col(|ui| {
                    if out {
                        ui.colored_label(Color32::from_rgb(244, 63, 94), "ALERT");
                    } else {
                        ui.colored_label(Color32::from_rgb(16, 185, 129), "OK");
                    }
                });
            });
        });
}
