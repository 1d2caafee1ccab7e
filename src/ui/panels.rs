use beverage_insights::data::filter::BoundField;
use eframe::egui::{self, Grid, RichText, TextEdit, Ui};

use crate::app::BeverageInsightsApp;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, app: &mut BeverageInsightsApp) {
    ui.heading("Filters");
    ui.separator();

    if app.state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let state = &mut app.state;
    let mut apply = false;

    Grid::new("filter_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Category:");
            let selected = if state.filter_input.category.is_empty() {
                "(any)".to_string()
            } else {
                state.filter_input.category.clone()
            };
            egui::ComboBox::from_id_salt("category_filter")
                .selected_text(selected)
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut state.filter_input.category, String::new(), "(any)");
                    for cat in &state.categories {
                        ui.selectable_value(&mut state.filter_input.category, cat.clone(), cat.as_str());
                    }
                });
            ui.end_row();

            for field in BoundField::ALL {
                ui.label(format!("{}:", field.label()));
                let response = ui.add(
                    TextEdit::singleline(state.filter_input.text_mut(field)).desired_width(100.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    apply = true;
                }
                ui.end_row();
            }
        });

    ui.add_space(6.0);
    if ui.button("Apply filters").clicked() {
        apply = true;
    }
    if ui.small_button("Clear").clicked() {
        state.filter_input = Default::default();
        apply = true;
    }

    if apply {
        app.apply_filters();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, app: &mut BeverageInsightsApp) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Load file…").clicked() {
            open_file_dialog(app);
        }
        if ui.button("Data info").clicked() {
            app.open_info();
        }
        if ui.button("Recommendations").clicked() {
            app.open_recommendations();
        }

        ui.separator();

        if let Some(ds) = &app.state.dataset {
            ui.label(
                RichText::new(format!(
                    "{} records loaded, {} visible",
                    ds.len(),
                    app.state.visible_count()
                ))
                .weak(),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(app: &mut BeverageInsightsApp) {
    let file = rfd::FileDialog::new()
        .set_title("Open beverage data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        app.load(&path);
    }
}
