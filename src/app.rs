use std::path::Path;

use beverage_insights::info::DataInfo;
use beverage_insights::{AppState, Recommendations};
use eframe::egui;

use crate::color::ColorMap;
use crate::ui::{dialogs, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// A user-visible error or warning shown in a small window.
pub struct Notice {
    pub title: &'static str,
    pub text: String,
}

/// Presentation-only state layered over the session.
#[derive(Default)]
pub struct BeverageInsightsApp {
    pub state: AppState,
    pub color_map: ColorMap,
    /// Open "Data info" window, computed when opened.
    pub info: Option<DataInfo>,
    /// Open "Recommendations" window, computed when opened.
    pub recommendations: Option<Recommendations>,
    pub recommendation_tab: dialogs::RecommendationTab,
    pub notice: Option<Notice>,
}

impl BeverageInsightsApp {
    /// Start with `data` loaded when the file exists.
    pub fn with_initial_file(data: &Path) -> Self {
        let mut app = Self::default();
        if data.exists() {
            app.load(data);
        } else {
            log::info!("{} not found, starting empty", data.display());
        }
        app
    }

    /// Load a file and surface failures as a notice.
    pub fn load(&mut self, path: &Path) {
        match self.state.load_from(path) {
            Ok(_) => {
                self.color_map = ColorMap::new(&self.state.categories);
                // Open windows describe the replaced dataset.
                self.info = None;
                self.recommendations = None;
            }
            Err(e) => self.error(format!("Could not load the file: {e}")),
        }
    }

    pub fn apply_filters(&mut self) {
        if let Err(e) = self.state.apply_filters() {
            self.error(capitalize(&e.to_string()));
        }
    }

    pub fn open_info(&mut self) {
        match self.state.data_info() {
            Ok(info) => self.info = Some(info),
            Err(e) => self.warn(capitalize(&e.to_string())),
        }
    }

    pub fn open_recommendations(&mut self) {
        match self.state.recommendations() {
            Ok(recs) => self.recommendations = Some(recs),
            Err(e) => self.warn(capitalize(&e.to_string())),
        }
    }

    pub fn error(&mut self, text: String) {
        self.notice = Some(Notice {
            title: "Error",
            text,
        });
    }

    pub fn warn(&mut self, text: String) {
        self.notice = Some(Notice {
            title: "Warning",
            text,
        });
    }
}

impl eframe::App for BeverageInsightsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: actions ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, self);
        });

        // ---- Status bar ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.state.status_message.as_str());
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, self);
            });

        // ---- Charts below the table ----
        egui::TopBottomPanel::bottom("chart_panel")
            .resizable(true)
            .default_height(420.0)
            .show(ctx, |ui| {
                plot::chart_grid(ui, &self.state, &self.color_map);
            });

        // ---- Central panel: table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::data_table(ui, &self.state);
        });

        dialogs::info_window(ctx, self);
        dialogs::recommendations_window(ctx, self);
        dialogs::notice_window(ctx, self);
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
