//! Application composition
//!
//! `FleetScope` owns the working state, the simulation ticker, and the
//! persistence store. Store writes are optimistic: the working copy is
//! updated first, the write is attempted, and a failure surfaces in the
//! status bar and schedules a reconciling refresh.

use crate::constants::history::FETCH_LIMIT;
use crate::error::FleetError;
use crate::model::{ConfigPatch, DeviceId, DeviceStatus, Thresholds, TimeSeriesPoint};
use crate::sim::SimulationTicker;
use crate::state::{ActiveView, AppState};
use crate::store::DeviceStore;
use crate::ui::detail::{render_detail, DetailAction};
use crate::ui::fleet_panel::render_fleet;
use chrono::Utc;
use egui::{Color32, RichText};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

pub struct FleetScope {
    state: AppState,
    ticker: SimulationTicker,
    store: Box<dyn DeviceStore>,
    rng: StdRng,
}

impl FleetScope {
    pub fn new(store: Box<dyn DeviceStore>) -> Self {
        let mut app = Self {
            state: AppState::default(),
            ticker: SimulationTicker::default(),
            store,
            rng: StdRng::from_entropy(),
        };
        app.refresh_fleet();
        app
    }

    /// Refetch the fleet from the store and merge it into the working copy
    fn refresh_fleet(&mut self) {
        match self.store.fetch_devices() {
            Ok(devices) => {
                self.state.fleet.replace_from_store(devices);
                self.ticker.retain_devices(&self.state.fleet.devices);
                self.state.ui.reconcile_pending = false;

                // An open detail view must follow the reconciled device
                if self.state.ui.active_view == ActiveView::Detail {
                    if let Some(device) = self.state.fleet.selected_device() {
                        let thresholds = device.thresholds;
                        let config = device.config.clone();
                        self.state.detail.resync_drafts_if_stale(thresholds);
                        self.state.detail.sampling_secs = config.sampling_interval_secs;
                        self.state.detail.calibration = config.calibration_offset;
                        self.state.detail.heartbeat_secs = config.heartbeat_secs;
                    } else {
                        self.close_detail();
                    }
                }
            }
            // No request_refresh here: the retry would fail again next frame
            // and spin at repaint cadence. The next write or reopen retries.
            Err(e) => {
                log::warn!("fleet refresh failed: {}", e);
                self.state.ui.set_error(format!("{}: {}", e.title(), e.user_message()));
                self.state.ui.reconcile_pending = true;
            }
        }
    }

    fn open_device(&mut self, id: DeviceId) {
        let fetched = match self.store.fetch_measurements(&id, FETCH_LIMIT) {
            Ok(points) => points,
            Err(e) => {
                log::warn!("measurement fetch for {} failed: {}", id, e);
                Vec::new()
            }
        };
        let now_ms = Utc::now().timestamp_millis();
        let Some(device) = self.state.fleet.device(&id) else {
            return;
        };
        let device = device.clone();
        self.state.detail.enter(&device, fetched, now_ms);
        self.state.fleet.selected = Some(id);
        self.state.ui.active_view = ActiveView::Detail;
    }

    fn close_detail(&mut self) {
        self.state.detail.leave();
        self.state.fleet.selected = None;
        self.state.ui.active_view = ActiveView::Fleet;
    }

    /// Persist a committed threshold pair (the working copy is already updated)
    fn commit_thresholds(&mut self, id: DeviceId, thresholds: Thresholds) {
        if let Some(device) = self.state.fleet.device_mut(&id) {
            device.thresholds = thresholds;
        }
        if let Err(e) = self.store.update_thresholds(&id, thresholds) {
            self.report_store_failure("threshold update", e);
        }
    }

    /// Apply a config patch locally, then persist it
    fn apply_config_patch(&mut self, id: DeviceId, patch: ConfigPatch) {
        if let Some(device) = self.state.fleet.device_mut(&id) {
            if let Some(secs) = patch.sampling_interval_secs {
                device.config.sampling_interval_secs = secs.max(1);
            }
            if let Some(offset) = patch.calibration_offset {
                if offset.is_finite() {
                    device.config.calibration_offset = offset;
                }
            }
            if let Some(secs) = patch.heartbeat_secs {
                device.config.heartbeat_secs = secs.max(1);
            }
            if let Some(on) = patch.maintenance {
                device.status = if on {
                    DeviceStatus::Maintenance
                } else {
                    DeviceStatus::Online
                };
            }
        }
        if let Err(e) = self.store.update_config(&id, patch) {
            self.report_store_failure("config update", e);
        }
    }

    /// A store write/read failed: keep the optimistic local state, surface the
    /// error, and schedule a refresh to reconcile against what the store holds
    fn report_store_failure(&mut self, what: &str, e: FleetError) {
        log::warn!("{} failed: {}", what, e);
        self.state.ui.set_error(format!("{}: {}", e.title(), e.user_message()));
        self.state.ui.reconcile_pending = true;
        self.state.ui.request_refresh();
    }

    fn advance_simulation(&mut self) {
        let outcome = self.ticker.poll(
            Instant::now(),
            &mut self.state.fleet.devices,
            &mut self.rng,
        );
        if !outcome.any_sampled() {
            return;
        }

        // Feed the open detail view's rolling window
        if self.state.ui.active_view == ActiveView::Detail {
            if let Some(id) = self.state.fleet.selected.clone() {
                if outcome.was_sampled(&id) {
                    if let Some(device) = self.state.fleet.device(&id) {
                        let point = TimeSeriesPoint {
                            value: device.value,
                            timestamp_ms: Utc::now().timestamp_millis(),
                        };
                        self.state.detail.history.push(point);
                    }
                }
            }
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("FleetScope");
                ui.weak("IoT telemetry console");
                if let Some(message) = self.state.ui.error_message.clone() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("\u{2715}").clicked() {
                            self.state.ui.clear_error();
                        }
                        ui.label(
                            RichText::new(message).color(Color32::from_rgb(244, 63, 94)),
                        );
                    });
                }
            });
        });
    }
}

impl eframe::App for FleetScope {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::scope!("frame");

        self.advance_simulation();

        if self.state.ui.refresh_requested {
            self.state.ui.refresh_requested = false;
            self.refresh_fleet();
        }

        self.render_top_bar(ctx);

        let mut opened: Option<DeviceId> = None;
        let mut detail_actions: Vec<DetailAction> = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.state.ui.active_view {
                ActiveView::Fleet => {
                    opened = render_fleet(&mut self.state, ui);
                }
                ActiveView::Detail => {
                    detail_actions = render_detail(&mut self.state, ui);
                }
            }
        });

        if let Some(id) = opened {
            self.open_device(id);
        }
        if !detail_actions.is_empty() {
            let selected = self.state.fleet.selected.clone();
            for action in detail_actions {
                match action {
                    DetailAction::Back => self.close_detail(),
                    DetailAction::CommitThresholds(thresholds) => {
                        if let Some(id) = selected.clone() {
                            self.commit_thresholds(id, thresholds);
                        }
                    }
                    DetailAction::ApplyPatch(patch) => {
                        if let Some(id) = selected.clone() {
                            self.apply_config_patch(id, patch);
                        }
                    }
                }
            }
        }

        // The simulation runs even while the pointer is idle
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
