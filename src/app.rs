use eframe::egui;
use record_sieve::SieveConfig;

use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RecordSieveApp {
    pub state: AppState,
}

impl RecordSieveApp {
    pub fn new(config: SieveConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for RecordSieveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: criteria form ----
        egui::SidePanel::left("criteria_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: preview table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::preview_table(ui, &mut self.state);
        });
    }
}
