use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::app::BeverageInsightsApp;

/// Tabs of the recommendations window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendationTab {
    #[default]
    General,
    ByCategory,
}

fn text_block(ui: &mut Ui, lines: &[String]) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for line in lines {
                ui.label(line.as_str());
            }
        });
}

/// "Data info" window for the loaded dataset.
pub fn info_window(ctx: &egui::Context, app: &mut BeverageInsightsApp) {
    let Some(info) = &app.info else {
        return;
    };
    let mut open = true;
    egui::Window::new("Data info")
        .open(&mut open)
        .default_size([600.0, 400.0])
        .show(ctx, |ui: &mut Ui| {
            text_block(ui, &info.lines());
        });
    if !open {
        app.info = None;
    }
}

/// Recommendations window with a general and a per-category tab.
pub fn recommendations_window(ctx: &egui::Context, app: &mut BeverageInsightsApp) {
    let Some(recs) = &app.recommendations else {
        return;
    };
    let tab = &mut app.recommendation_tab;
    let mut open = true;
    egui::Window::new("Recommendations")
        .open(&mut open)
        .default_size([800.0, 600.0])
        .show(ctx, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.selectable_value(tab, RecommendationTab::General, "General");
                ui.selectable_value(tab, RecommendationTab::ByCategory, "By category");
            });
            ui.separator();
            let lines = match tab {
                RecommendationTab::General => recs.general_lines(),
                RecommendationTab::ByCategory => recs.category_lines(),
            };
            text_block(ui, &lines);
        });
    if !open {
        app.recommendations = None;
    }
}

/// Error / warning message box.
pub fn notice_window(ctx: &egui::Context, app: &mut BeverageInsightsApp) {
    let Some(notice) = &app.notice else {
        return;
    };
    let mut dismissed = false;
    egui::Window::new(notice.title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            let color = if notice.title == "Error" {
                Color32::RED
            } else {
                Color32::YELLOW
            };
            ui.label(RichText::new(&notice.text).color(color));
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    if dismissed {
        app.notice = None;
    }
}
