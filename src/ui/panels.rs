use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use record_sieve::data::LogicalOperand;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – criteria form
// ---------------------------------------------------------------------------

/// Render the criteria form: one group per row plus "Add field" and "Filter".
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter criteria");
    ui.separator();

    if state.session.dataset().is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let fields = state.field_names();
    // (row index, newly chosen field) – applied after the loop so the value
    // dropdown can be reset through AppState.
    let mut field_change: Option<(usize, String)> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .max_height((ui.available_height() - 60.0).max(120.0))
        .show(ui, |ui: &mut Ui| {
            for index in 0..state.rows.len() {
                let n = index + 1;
                let values = state.value_options(&state.rows[index].field);
                let row = &mut state.rows[index];

                ui.group(|ui: &mut Ui| {
                    ui.strong(format!("Field {n}"));
                    egui::ComboBox::from_id_salt(("field", index))
                        .selected_text(row.field.as_str())
                        .show_ui(ui, |ui: &mut Ui| {
                            for field in &fields {
                                if ui.selectable_label(row.field == *field, field.as_str()).clicked()
                                    && row.field != *field
                                {
                                    field_change = Some((index, field.clone()));
                                }
                            }
                        });

                    ui.label(format!("Field {n} value"));
                    egui::ComboBox::from_id_salt(("value", index))
                        .selected_text(row.value.as_str())
                        .show_ui(ui, |ui: &mut Ui| {
                            for value in &values {
                                ui.selectable_value(&mut row.value, value.clone(), value.as_str());
                            }
                        });

                    ui.horizontal(|ui: &mut Ui| {
                        ui.radio_value(&mut row.operand, LogicalOperand::And, "AND");
                        ui.radio_value(&mut row.operand, LogicalOperand::Or, "OR");
                    });
                });
            }
        });

    if let Some((index, field)) = field_change {
        state.set_row_field(index, field);
    }

    ui.separator();
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Add field").clicked() {
            state.add_row();
        }
        if ui.button("Filter").clicked() {
            run_filter(state);
        }
    });

    if let Some(text) = state.record_count_text() {
        ui.label(text);
    }
}

fn run_filter(state: &mut AppState) {
    match state.apply_filters() {
        Ok(_) => state.status_message = None,
        Err(e) => {
            log::error!("Failed to apply filters: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.session.view().is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = state.session.dataset() {
            ui.label(format!(
                "{} records loaded, {} fields",
                ds.len(),
                ds.field_names().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open records")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered records")
        .set_file_name(&state.session.config().export_file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.export_to(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
