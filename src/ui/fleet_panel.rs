//! Fleet overview: one card per device

use crate::constants::layout::FLEET_CARD_WIDTH;
use crate::model::{Device, DeviceId, DeviceStatus};
use crate::state::AppState;
use egui::{Color32, RichText, Vec2};

/// Render the fleet card grid; returns the device the operator opened
pub fn render_fleet(state: &mut AppState, ui: &mut egui::Ui) -> Option<DeviceId> {
    profiling::scope!("render_fleet");

    let mut opened = None;

    ui.heading("Fleet");
    ui.label(
        RichText::new(format!("{} devices on network", state.fleet.devices.len()))
            .small()
            .weak(),
    );
    ui.add_space(8.0);

    if state.fleet.devices.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.weak("No devices in the store");
        });
        return None;
    }

    let columns = ((ui.available_width() / FLEET_CARD_WIDTH).floor() as usize).max(1);
    egui::Grid::new("fleet_grid")
        .num_columns(columns)
        .spacing(Vec2::splat(12.0))
        .show(ui, |ui| {
            for (i, device) in state.fleet.devices.iter().enumerate() {
                if let Some(id) = device_card(device, ui) {
                    opened = Some(id);
                }
                if (i + 1) % columns == 0 {
                    ui.end_row();
                }
            }
        });

    opened
}

fn device_card(device: &Device, ui: &mut egui::Ui) -> Option<DeviceId> {
    let mut opened = None;
    egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(FLEET_CARD_WIDTH - 24.0);
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.strong(&device.name);
                    ui.label(RichText::new(device.id.as_str()).small().weak().monospace());
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    let (color, text) = status_badge(device.status);
                    ui.label(RichText::new(text).small().color(color));
                });
            });
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let value_color = if device.is_alarm() {
                    Color32::from_rgb(244, 63, 94)
                } else {
                    Color32::from_rgb(34, 211, 238)
                };
                ui.label(
                    RichText::new(format!("{:.2}", device.displayed_value()))
                        .size(26.0)
                        .strong()
                        .color(value_color),
                );
                ui.label(RichText::new(&device.unit).small().weak());
            });
            ui.add_space(6.0);
            if ui.button("View live").clicked() {
                opened = Some(device.id.clone());
            }
        });
    opened
}

fn status_badge(status: DeviceStatus) -> (Color32, &'static str) {
    match status {
        DeviceStatus::Online => (Color32::from_rgb(16, 185, 129), "online"),
        DeviceStatus::Offline => (Color32::from_rgb(100, 116, 139), "offline"),
        DeviceStatus::Maintenance => (Color32::from_rgb(245, 158, 11), "maintenance"),
    }
}
