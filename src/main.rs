mod app;
mod cli;
mod color;
mod ui;

use app::BeverageInsightsApp;
use clap::Parser;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = cli::Args::parse();

    if args.report {
        return cli::run_report(&args);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let app = BeverageInsightsApp::with_initial_file(&args.data);
    eframe::run_native(
        "Beverage Insights",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("running the window: {e}"))
}
