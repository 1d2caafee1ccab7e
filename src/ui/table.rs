use beverage_insights::AppState;
use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Data table (central panel)
// ---------------------------------------------------------------------------

/// Render the current view as a table with one column per source column.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let view = match &state.view {
        Some(v) => v,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Load a file to view beverages  (Load file…)");
            });
            return;
        }
    };

    let columns = view.schema().columns();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .auto_shrink([false, false])
        .columns(Column::auto().at_least(60.0), columns.len())
        .header(22.0, |mut header| {
            for (name, _) in columns {
                header.col(|ui| {
                    ui.label(RichText::new(name).strong());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, view.len(), |mut row| {
                let record = &view.records()[row.index()];
                for (_, column) in columns {
                    row.col(|ui| {
                        ui.label(record.display(column));
                    });
                }
            });
        });
}
