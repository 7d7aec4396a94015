use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

/// Render the filtered records, one row per listing, source columns in order.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore jobs  (File → Open…)");
        });
        return;
    }

    let table = &state.filtered;
    if table.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No jobs match the current filters.");
        });
        return;
    }

    let columns = &table.columns;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto())
        .columns(Column::initial(140.0).clip(true), columns.len())
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for name in columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.len(), |mut row| {
                let index = row.index();
                let record = &table.records[index];
                row.col(|ui| {
                    ui.label((index + 1).to_string());
                });
                for name in columns {
                    row.col(|ui| {
                        ui.label(record.field(name).unwrap_or(""));
                    });
                }
            });
        });
}
