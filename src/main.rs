mod app;
mod state;
mod ui;

use app::RecordSieveApp;
use eframe::egui;
use record_sieve::SieveConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = SieveConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Record Sieve – JSON filter & CSV export",
        options,
        Box::new(|_cc| Ok(Box::new(RecordSieveApp::new(config)))),
    )
}
