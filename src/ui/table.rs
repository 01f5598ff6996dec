use eframe::egui::{Checkbox, Ui};
use egui_extras::{Column, TableBuilder};
use record_sieve::data::model::field_text;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Preview table (central panel)
// ---------------------------------------------------------------------------

/// Render the first few filtered records. Each header cell carries the
/// checkbox that decides whether the column is exported.
pub fn preview_table(ui: &mut Ui, state: &mut AppState) {
    if state.session.dataset().is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a JSON file to filter records  (File → Open…)");
        });
        return;
    }

    if state.session.view().is_none() {
        ui.label("Choose criteria and press Filter to preview matching records.");
        return;
    }

    let rows = state.session.preview();
    if rows.is_empty() {
        ui.label("No records match the current criteria.");
        return;
    }

    ui.label(format!(
        "Showing {} of {} filtered records. Untick a column to leave it out of the export.",
        rows.len(),
        state.session.view().map_or(0, |v| v.len())
    ));
    ui.separator();

    let columns = &mut state.columns;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), columns.len())
        .header(24.0, |mut header| {
            for column in columns.iter_mut() {
                header.col(|ui: &mut Ui| {
                    ui.add(Checkbox::new(&mut column.selected, column.name.as_str()));
                });
            }
        })
        .body(|mut body| {
            for record in rows {
                body.row(20.0, |mut row| {
                    for column in columns.iter() {
                        row.col(|ui: &mut Ui| {
                            ui.label(field_text(record.get(&column.name)));
                        });
                    }
                });
            }
        });
}
