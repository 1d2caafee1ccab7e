use std::path::PathBuf;

use anyhow::{Context, Result};
use beverage_insights::{AppState, FilterInput, DEFAULT_DATA_FILE};
use clap::Parser;

/// Desktop viewer for beverage nutrition data.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Dataset to open at start-up (.csv, .json or .parquet)
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Print the data info, filter result and recommendations, then exit
    #[arg(long)]
    pub report: bool,

    /// Keep only this category (report mode)
    #[arg(long, requires = "report")]
    pub category: Option<String>,

    /// Keep drinks with at most this many calories (report mode)
    #[arg(long, requires = "report")]
    pub calories_max: Option<String>,

    /// Keep drinks with at least this much caffeine in mg (report mode)
    #[arg(long, requires = "report")]
    pub caffeine_min: Option<String>,

    /// Keep drinks with at most this much sugar in g (report mode)
    #[arg(long, requires = "report")]
    pub sugars_max: Option<String>,

    /// Keep drinks with at least this much protein in g (report mode)
    #[arg(long, requires = "report")]
    pub protein_min: Option<String>,
}

impl Args {
    /// Filter fields as given on the command line.
    pub fn filter_input(&self) -> FilterInput {
        FilterInput {
            category: self.category.clone().unwrap_or_default(),
            calories_max: self.calories_max.clone().unwrap_or_default(),
            caffeine_min: self.caffeine_min.clone().unwrap_or_default(),
            sugars_max: self.sugars_max.clone().unwrap_or_default(),
            protein_min: self.protein_min.clone().unwrap_or_default(),
        }
    }
}

/// Headless report: the same operations the window offers, printed to
/// stdout.
pub fn run_report(args: &Args) -> Result<()> {
    let mut state = AppState::default();
    state
        .load_from(&args.data)
        .with_context(|| format!("loading {}", args.data.display()))?;
    println!("{}", state.status_message);
    println!();

    println!("{}", state.data_info()?);

    let input = args.filter_input();
    if input != FilterInput::default() {
        state.filter_input = input;
        state.apply_filters().context("applying filters")?;
        println!();
        println!("{}", state.status_message);
    }

    let recs = state.recommendations()?;
    println!();
    println!("General recommendations");
    println!("{}", recs.general_lines().join("\n"));
    println!();
    println!("By category");
    println!("{}", recs.category_lines().join("\n"));
    Ok(())
}
