//! Core engine of the beverage nutrition viewer.
//!
//! Everything in this crate is UI-free: the egui front end in `main.rs`
//! (and the headless `--report` mode) only call the functions exported here
//! and render what they return.
//!
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   data::loader ──► Dataset ──► data::filter ──► Dataset (view)
//!                       │                             │
//!                       ▼                             ▼
//!              stats / recommend / info            charts
//! ```

pub mod charts;
pub mod data;
pub mod error;
pub mod info;
pub mod recommend;
pub mod state;
pub mod stats;

pub use data::filter::{apply_filters, FilterInput, FilterSpec};
pub use data::loader::load_file;
pub use data::model::{Dataset, NumericColumn, Record};
pub use error::{FilterInputError, LoadError, SessionError};
pub use recommend::{recommend, RecommendationRules, Recommendations};
pub use state::AppState;
pub use stats::{describe, group_means, AggregateSummary};

/// File the desktop app and the report mode open when no path is given.
pub const DEFAULT_DATA_FILE: &str = "starbucks_processed.csv";
