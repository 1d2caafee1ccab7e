use beverage_insights::charts::ChartData;
use beverage_insights::AppState;
use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use crate::color::{ColorMap, ACCENT, ACCENT_LIGHT};

// ---------------------------------------------------------------------------
// Chart grid (bottom panel)
// ---------------------------------------------------------------------------

/// Render the four summary charts for the current view in a 2×2 grid.
pub fn chart_grid(ui: &mut Ui, state: &AppState, color_map: &ColorMap) {
    let charts = match &state.charts {
        Some(c) => c,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                if state.dataset.is_some() {
                    ui.label("No records match the filters.");
                }
            });
            return;
        }
    };

    let height = ((ui.available_height() - 40.0) / 2.0).max(120.0);

    ui.columns(2, |cols| {
        calorie_histogram(&mut cols[0], charts, height);
        sugar_by_category(&mut cols[1], charts, color_map, height);
    });
    ui.columns(2, |cols| {
        sugar_vs_calories(&mut cols[0], charts, height);
        caffeine_box(&mut cols[1], charts, height);
    });
}

fn title(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).strong());
}

fn calorie_histogram(ui: &mut Ui, charts: &ChartData, height: f32) {
    title(ui, "Calorie distribution");
    let bars: Vec<Bar> = charts
        .calorie_histogram
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .fill(ACCENT)
        })
        .collect();

    Plot::new("calorie_histogram")
        .height(height)
        .x_axis_label("Calories")
        .y_axis_label("Number of drinks")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(ACCENT));
        });
}

fn sugar_by_category(ui: &mut Ui, charts: &ChartData, color_map: &ColorMap, height: f32) {
    title(ui, "Average sugar by category");
    let Some(bars) = &charts.sugar_by_category else {
        ui.label("No category data.");
        return;
    };

    Plot::new("sugar_by_category")
        .height(height)
        .legend(Legend::default())
        .y_axis_label("Average sugar (g)")
        .show_x(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (category, mean)) in bars.iter().enumerate() {
                let color = color_map.color_for(category);
                let bar = Bar::new(i as f64, *mean).width(0.8).fill(color);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(category).color(color));
            }
        });
}

fn sugar_vs_calories(ui: &mut Ui, charts: &ChartData, height: f32) {
    title(ui, "Sugar vs calories");
    let points = PlotPoints::from(charts.sugar_vs_calories.clone());

    Plot::new("sugar_vs_calories")
        .height(height)
        .x_axis_label("Sugar (g)")
        .y_axis_label("Calories")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(points).radius(2.5).color(ACCENT_LIGHT));
        });
}

fn caffeine_box(ui: &mut Ui, charts: &ChartData, height: f32) {
    title(ui, "Caffeine distribution");
    let Some(summary) = &charts.caffeine_box else {
        ui.label("No caffeine values.");
        return;
    };

    let elem = BoxElem::new(
        0.0,
        BoxSpread::new(
            summary.lower_whisker,
            summary.q1,
            summary.median,
            summary.q3,
            summary.upper_whisker,
        ),
    )
    .box_width(0.5)
    .fill(ACCENT.gamma_multiply(0.6));
    let outliers: Vec<[f64; 2]> = summary.outliers.iter().map(|&v| [0.0, v]).collect();

    Plot::new("caffeine_box")
        .height(height)
        .y_axis_label("Caffeine (mg)")
        .show_x(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(vec![elem]).name("caffeine_mg").color(ACCENT));
            plot_ui.points(Points::new(PlotPoints::from(outliers)).radius(2.0).color(ACCENT));
        });
}
