use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::data::filter::BoundField;

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Failure to turn a resource into a [`Dataset`](crate::Dataset).
///
/// A failed load never touches the previously loaded dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("row {row}, column '{column}': value is required")]
    MissingValue { row: usize, column: &'static str },

    #[error("row {row}, column '{column}': '{value}' is not a non-negative number")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected layout: {0}")]
    Layout(String),

    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("reading arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Filter input errors
// ---------------------------------------------------------------------------

/// One numeric filter field whose text could not be used as a bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidBound {
    pub field: BoundField,
    pub input: String,
}

impl fmt::Display for InvalidBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = '{}'", self.field.label(), self.input)
    }
}

/// Raised when one or more numeric filter fields hold text that is not a
/// finite, non-negative number. No part of the filter is applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("check the filter values: {}", list_fields(.fields))]
pub struct FilterInputError {
    pub fields: Vec<InvalidBound>,
}

fn list_fields(fields: &[InvalidBound]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Session errors
// ---------------------------------------------------------------------------

/// Everything an [`AppState`](crate::AppState) operation can report back to
/// the presentation layer. None of these end the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("load data first")]
    NotLoaded,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    FilterInput(#[from] FilterInputError),
}
