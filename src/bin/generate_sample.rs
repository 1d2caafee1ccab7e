use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::{Parser, ValueEnum};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a deterministic sample beverage dataset.
#[derive(Debug, Parser)]
struct Args {
    /// Output file
    #[arg(long, default_value = beverage_insights::DEFAULT_DATA_FILE)]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Seed for the generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Parquet,
}

/// One output row, in file column order.
#[derive(Debug, Serialize)]
struct SampleRow {
    beverage_category: &'static str,
    beverage: &'static str,
    beverage_prep: &'static str,
    calories: f64,
    caffeine_mg: Option<f64>,
    sugars_g: f64,
    protein_g: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Normal sample clipped at zero and rounded to one decimal.
    fn nutrient(&mut self, mean: f64, std_dev: f64) -> f64 {
        (self.gauss(mean, std_dev).max(0.0) * 10.0).round() / 10.0
    }
}

/// (category, drinks, mean calories, mean sugar g, mean caffeine mg, mean protein g)
const MENU: &[(&str, &[&str], f64, f64, f64, f64)] = &[
    ("Coffee", &["Brewed Coffee"], 4.0, 0.0, 175.0, 0.5),
    ("Classic Espresso Drinks", &["Caffe Latte", "Cappuccino", "Caffe Mocha"], 190.0, 22.0, 110.0, 10.0),
    ("Signature Espresso Drinks", &["White Chocolate Mocha", "Caramel Macchiato"], 290.0, 42.0, 120.0, 10.0),
    ("Tazo Tea Drinks", &["Tazo Chai Tea Latte", "Tazo Green Tea Latte"], 190.0, 33.0, 60.0, 7.0),
    ("Frappuccino Blended Coffee", &["Coffee Frappuccino", "Mocha Frappuccino"], 280.0, 55.0, 90.0, 4.0),
    ("Smoothies", &["Banana Chocolate Smoothie", "Strawberry Smoothie"], 280.0, 35.0, 10.0, 17.0),
];

const PREPS: [&str; 4] = ["Short Nonfat Milk", "Tall 2% Milk", "Grande Soymilk", "Venti Nonfat Milk"];

fn generate(rng: &mut SimpleRng) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    for &(category, drinks, calories, sugars, caffeine, protein) in MENU {
        for &drink in drinks {
            for (size, &prep) in PREPS.iter().enumerate() {
                let scale = 0.6 + 0.3 * size as f64;
                // Some tea and smoothie entries have no caffeine figure.
                let caffeine_mg = if caffeine < 70.0 && rng.next_f64() < 0.25 {
                    None
                } else {
                    Some(rng.nutrient(caffeine * scale, caffeine * 0.1))
                };
                rows.push(SampleRow {
                    beverage_category: category,
                    beverage: drink,
                    beverage_prep: prep,
                    calories: rng.nutrient(calories * scale, calories * 0.1 + 1.0),
                    caffeine_mg,
                    sugars_g: rng.nutrient(sugars * scale, sugars * 0.1),
                    protein_g: rng.nutrient(protein * scale, protein * 0.1),
                });
            }
        }
    }
    rows
}

fn write_csv(rows: &[SampleRow], out: &PathBuf) -> Result<()> {
    let mut writer = csv::Writer::from_path(out).context("creating output file")?;
    for row in rows {
        writer.serialize(row).context("writing row")?;
    }
    writer.flush().context("flushing output")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], out: &PathBuf) -> Result<()> {
    let text = |f: fn(&SampleRow) -> &'static str| StringArray::from(rows.iter().map(f).collect::<Vec<_>>());
    let num = |f: fn(&SampleRow) -> Option<f64>| Float64Array::from(rows.iter().map(f).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("beverage_category", DataType::Utf8, false),
        Field::new("beverage", DataType::Utf8, false),
        Field::new("beverage_prep", DataType::Utf8, false),
        Field::new("calories", DataType::Float64, false),
        Field::new("caffeine_mg", DataType::Float64, true),
        Field::new("sugars_g", DataType::Float64, false),
        Field::new("protein_g", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(text(|r| r.beverage_category)),
            Arc::new(text(|r| r.beverage)),
            Arc::new(text(|r| r.beverage_prep)),
            Arc::new(num(|r| Some(r.calories))),
            Arc::new(num(|r| r.caffeine_mg)),
            Arc::new(num(|r| Some(r.sugars_g))),
            Arc::new(num(|r| Some(r.protein_g))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(out).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let rows = generate(&mut rng);

    match args.format {
        Format::Csv => write_csv(&rows, &args.out)?,
        Format::Parquet => write_parquet(&rows, &args.out)?,
    }

    println!("Wrote {} beverages to {}", rows.len(), args.out.display());
    Ok(())
}
