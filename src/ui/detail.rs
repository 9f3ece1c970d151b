//! Device detail view: live chart, control panel, history table
//!
//! Rendering mutates the working copy directly (mid-drag thresholds, slider
//! positions) and reports everything that must reach the store as a
//! `DetailAction`; the app layer owns the persistence collaborator and
//! applies the actions after the frame.

use crate::constants::layout::{CONTROL_PANEL_WIDTH, STANDARD_PADDING};
use crate::constants::sim::MAX_SAMPLING_INTERVAL_SECS;
use crate::model::{ConfigPatch, Device, DeviceStatus, Thresholds, TimeSeriesPoint};
use crate::state::{AppState, DetailState, DetailTab, TimeRange};
use crate::ui::chart::render_chart;
use crate::ui::history_table::render_history_table;
use crate::widgets::ThresholdInput;
use chrono::Utc;
use egui::{Color32, RichText, Slider};
use egui_extras::{Size, StripBuilder};

const ALARM_COLOR: Color32 = Color32::from_rgb(244, 63, 94);
const OK_COLOR: Color32 = Color32::from_rgb(16, 185, 129);
const MAINTENANCE_COLOR: Color32 = Color32::from_rgb(245, 158, 11);

/// Store-affecting outcome of one detail frame
pub enum DetailAction {
    /// Operator navigated back to the fleet view
    Back,
    /// A threshold pair was committed (drag release or input blur)
    CommitThresholds(Thresholds),
    /// A config control was committed
    ApplyPatch(ConfigPatch),
}

pub fn render_detail(state: &mut AppState, ui: &mut egui::Ui) -> Vec<DetailAction> {
    profiling::scope!("render_detail");

    let mut actions = Vec::new();
    let AppState { fleet, detail, .. } = state;

    let Some(id) = fleet.selected.clone() else {
        actions.push(DetailAction::Back);
        return actions;
    };
    let Some(device) = fleet.device_mut(&id) else {
        actions.push(DetailAction::Back);
        return actions;
    };

    // Thresholds can change under the drafts (drag commit, fleet refresh)
    detail.resync_drafts_if_stale(device.thresholds);

    let alarm = device.is_alarm();

    // --- Header ---
    ui.horizontal(|ui| {
        if ui.button("\u{2190} Fleet").clicked() {
            actions.push(DetailAction::Back);
        }
        ui.add_space(8.0);
        ui.vertical(|ui| {
            ui.heading(&device.name);
            ui.label(RichText::new(device.id.as_str()).small().weak().monospace());
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if alarm {
                ui.label(
                    RichText::new("\u{26a0} OUT OF RANGE")
                        .strong()
                        .color(ALARM_COLOR),
                );
            }
        });
    });
    ui.add_space(6.0);

    // --- Tabs ---
    ui.horizontal(|ui| {
        ui.selectable_value(&mut detail.tab, DetailTab::Monitoring, "Monitoring");
        ui.selectable_value(&mut detail.tab, DetailTab::History, "History");
    });
    ui.separator();

    match detail.tab {
        DetailTab::Monitoring => {
            StripBuilder::new(ui)
                .size(Size::remainder())
                .size(Size::exact(CONTROL_PANEL_WIDTH))
                .horizontal(|mut strip| {
                    strip.cell(|ui| {
                        monitoring_pane(ui, device, detail, alarm, &mut actions);
                    });
                    strip.cell(|ui| {
                        control_panel(ui, device, detail, alarm, &mut actions);
                    });
                });
        }
        DetailTab::History => {
            let points: Vec<TimeSeriesPoint> = detail.history.iter().copied().collect();
            render_history_table(ui, device, &points);
        }
    }

    actions
}

/// Left pane: readout, time range selector, live chart
fn monitoring_pane(
    ui: &mut egui::Ui,
    device: &mut Device,
    detail: &mut DetailState,
    alarm: bool,
    actions: &mut Vec<DetailAction>,
) {
    ui.horizontal(|ui| {
        let value_color = if alarm { ALARM_COLOR } else { OK_COLOR };
        ui.label(
            RichText::new(format!("{:.2}", device.displayed_value()))
                .size(34.0)
                .strong()
                .color(value_color),
        );
        ui.label(RichText::new(&device.unit).weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            for range in TimeRange::ALL.iter().rev() {
                ui.selectable_value(&mut detail.time_range, *range, range.label());
            }
            ui.label(RichText::new("Window").small().weak());
        });
    });
    ui.add_space(4.0);

    let now_ms = Utc::now().timestamp_millis();
    let points = detail.visible_points(now_ms);
    if let Some(commit) = render_chart(
        ui,
        &points,
        &mut device.thresholds,
        &mut detail.drag,
        &device.unit,
        alarm,
    ) {
        detail.sync_drafts(commit.thresholds);
        actions.push(DetailAction::CommitThresholds(commit.thresholds));
    }
}

/// Right pane: thresholds, sampling, calibration, maintenance
fn control_panel(
    ui: &mut egui::Ui,
    device: &mut Device,
    detail: &mut DetailState,
    alarm: bool,
    actions: &mut Vec<DetailAction>,
) {
    egui::ScrollArea::vertical()
        .id_salt("detail_controls")
        .show(ui, |ui| {
            status_banner(ui, device.status, alarm);
            ui.add_space(8.0);

            ui.strong("Alarm thresholds");
            ui.add_space(2.0);
            ui.horizontal(|ui| {
                let min_resp = ThresholdInput::new("Min", &mut detail.min_draft)
                    .width(90.0)
                    .show(ui);
                let max_resp = ThresholdInput::new("Max", &mut detail.max_draft)
                    .width(90.0)
                    .show(ui);
                if min_resp.lost_focus() || max_resp.lost_focus() {
                    if let Some(committed) = detail.commit_drafts() {
                        if committed != device.thresholds {
                            device.thresholds = committed;
                            actions.push(DetailAction::CommitThresholds(committed));
                        }
                    }
                }
            });
            ui.label(
                RichText::new("Drag the dashed lines on the chart to adjust")
                    .small()
                    .weak(),
            );

            ui.add_space(STANDARD_PADDING);
            ui.separator();
            ui.strong("Sampling interval");
            let slider = ui.add(
                Slider::new(&mut detail.sampling_secs, 1..=MAX_SAMPLING_INTERVAL_SECS)
                    .suffix(" s"),
            );
            if (slider.drag_stopped() || slider.lost_focus())
                && detail.sampling_secs != device.config.sampling_interval_secs
            {
                actions.push(DetailAction::ApplyPatch(ConfigPatch::sampling_interval(
                    detail.sampling_secs,
                )));
            }

            ui.add_space(STANDARD_PADDING);
            ui.strong("Calibration offset");
            let drag_value = ui.add(
                egui::DragValue::new(&mut detail.calibration)
                    .speed(0.1)
                    .suffix(format!(" {}", device.unit)),
            );
            if (drag_value.drag_stopped() || drag_value.lost_focus())
                && detail.calibration != device.config.calibration_offset
            {
                actions.push(DetailAction::ApplyPatch(ConfigPatch::calibration(
                    detail.calibration,
                )));
            }

            ui.add_space(STANDARD_PADDING);
            ui.strong("Heartbeat");
            let heartbeat = ui.add(
                egui::DragValue::new(&mut detail.heartbeat_secs)
                    .speed(10)
                    .range(60..=86_400)
                    .suffix(" s"),
            );
            if (heartbeat.drag_stopped() || heartbeat.lost_focus())
                && detail.heartbeat_secs != device.config.heartbeat_secs
            {
                actions.push(DetailAction::ApplyPatch(ConfigPatch::heartbeat(
                    detail.heartbeat_secs,
                )));
            }

            ui.add_space(STANDARD_PADDING);
            ui.separator();
            let mut maintenance = device.status == DeviceStatus::Maintenance;
            if ui
                .checkbox(&mut maintenance, "Maintenance mode")
                .changed()
            {
                actions.push(DetailAction::ApplyPatch(ConfigPatch::maintenance(
                    maintenance,
                )));
            }
            ui.label(
                RichText::new("Suppresses out-of-range alerts while servicing")
                    .small()
                    .weak(),
            );

            if device.config.hardware.is_some() || device.config.endpoint.is_some() {
                ui.add_space(STANDARD_PADDING);
                ui.separator();
                if let Some(hardware) = &device.config.hardware {
                    ui.horizontal(|ui| {
                        ui.weak("Hardware");
                        ui.monospace(hardware);
                    });
                }
                if let Some(endpoint) = &device.config.endpoint {
                    ui.horizontal(|ui| {
                        ui.weak("Endpoint");
                        ui.monospace(endpoint);
                    });
                }
            }
        });
}

fn status_banner(ui: &mut egui::Ui, status: DeviceStatus, alarm: bool) {
    let (color, text) = if status == DeviceStatus::Maintenance {
        (MAINTENANCE_COLOR, "Under maintenance")
    } else if alarm {
        (ALARM_COLOR, "Out of range")
    } else {
        (OK_COLOR, "Operating normally")
    };
    egui::Frame::new()
        .fill(color.gamma_multiply(0.15))
        .corner_radius(6.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(color, text);
        });
}
