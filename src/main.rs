#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod chart;
mod constants;
mod error;
mod model;
mod sim;
mod state;
mod store;
mod ui;
mod widgets;

use app::FleetScope;
use store::JsonStore;

fn main() {
    env_logger::init();

    let store = match JsonStore::open(constants::store::STORE_FILE) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("store file unusable ({}), running in-memory", e);
            JsonStore::in_memory()
        }
    };

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "FleetScope - IoT Telemetry Console",
        options,
        Box::new(|_| Ok(Box::new(FleetScope::new(Box::new(store))))),
    )
    .unwrap();
}
