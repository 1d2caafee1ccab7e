use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{format_number, normalize_category, Column, Dataset, NumericColumn, Record, Schema};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a beverage dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one beverage per line (the usual export)
/// * `.json`    – `[{ "beverage_category": "...", "calories": 120, ... }, ...]`
/// * `.parquet` – flat numeric / string columns
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }?;

    log::debug!(
        "{}: {} records, columns {:?}",
        path.display(),
        dataset.len(),
        dataset.schema().column_names()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

/// A single source cell before it is checked against the schema.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Null,
}

impl Cell {
    fn from_text(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            Cell::Null
        } else {
            Cell::Text(s.to_string())
        }
    }

    fn into_text(self) -> String {
        match self {
            Cell::Text(s) => s,
            Cell::Number(v) => format_number(v),
            Cell::Null => String::new(),
        }
    }
}

/// Turn one row of cells (in schema order) into a typed [`Record`].
///
/// `row` is the 1-based data row used in error messages.
fn build_record(schema: &Schema, row: usize, cells: Vec<Cell>) -> Result<Record, LoadError> {
    let mut record = Record {
        category: None,
        calories: 0.0,
        caffeine_mg: None,
        sugars_g: 0.0,
        protein_g: 0.0,
        extra: Vec::new(),
    };

    for ((_, column), cell) in schema.columns().iter().zip(cells) {
        match column {
            Column::Category => {
                record.category = Some(normalize_category(&cell.into_text()));
            }
            Column::Extra(_) => record.extra.push(cell.into_text()),
            Column::Numeric(col) => {
                let value = match cell {
                    Cell::Null if col.is_optional() => None,
                    Cell::Null => {
                        return Err(LoadError::MissingValue {
                            row,
                            column: col.name(),
                        })
                    }
                    Cell::Number(v) => Some(v),
                    Cell::Text(s) => Some(s.parse::<f64>().map_err(|_| LoadError::InvalidValue {
                        row,
                        column: col.name(),
                        value: s.clone(),
                    })?),
                };
                if let Some(v) = value {
                    if !v.is_finite() || v < 0.0 {
                        return Err(LoadError::InvalidValue {
                            row,
                            column: col.name(),
                            value: format_number(v),
                        });
                    }
                }
                match col {
                    NumericColumn::Calories => record.calories = value.unwrap_or(0.0),
                    NumericColumn::CaffeineMg => record.caffeine_mg = value,
                    NumericColumn::SugarsG => record.sugars_g = value.unwrap_or(0.0),
                    NumericColumn::ProteinG => record.protein_g = value.unwrap_or(0.0),
                }
            }
        }
    }

    Ok(record)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one beverage per line.
/// Empty cells are missing values (allowed for `caffeine_mg` only).
fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let schema = Schema::from_headers(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let cells = row.iter().map(Cell::from_text).collect();
        records.push(build_record(&schema, row_no + 1, cells)?);
    }

    Ok(Dataset::new(schema, records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "beverage_category": "Coffee", "calories": 3, "caffeine_mg": 175,
///     "sugars_g": 0, "protein_g": 0.3 },
///   ...
/// ]
/// ```
///
/// Columns are the union of all object keys; a key absent from an object
/// counts as a missing value.
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::Layout("expected a top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| LoadError::Layout(format!("row {} is not a JSON object", i + 1)))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    let schema = Schema::from_headers(&headers)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let cells = headers
            .iter()
            .map(|h| row.get(h).map(json_to_cell).unwrap_or(Cell::Null))
            .collect();
        records.push(build_record(&schema, i + 1, cells)?);
    }

    Ok(Dataset::new(schema, records))
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Null,
        JsonValue::Number(n) => n
            .as_f64()
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Text(n.to_string())),
        JsonValue::String(s) => Cell::from_text(s),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Numeric columns may be Float64/Float32/Int64/Int32; text columns
/// Utf8/LargeUtf8. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let schema = Arc::new(Schema::from_headers(&headers)?);
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| arrow_cell(col.as_ref(), row))
                .collect::<Result<Vec<_>, _>>()?;
            records.push(build_record(&schema, records.len() + 1, cells)?);
        }
    }

    Ok(Dataset::with_schema(schema, records))
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &dyn Array, row: usize) -> Result<Cell, LoadError> {
    if col.is_null(row) {
        return Ok(Cell::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => Cell::from_text(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => Cell::from_text(col.as_string::<i64>().value(row)),
        DataType::Float64 => Cell::Number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Float32 => Cell::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Int64 => Cell::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Int32 => Cell::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Boolean => Cell::Text(col.as_boolean().value(row).to_string()),
        other => {
            return Err(LoadError::Layout(format!(
                "unsupported parquet column type {other:?}"
            )))
        }
    };
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::from_headers(&["beverage_category", "calories", "caffeine_mg", "sugars_g", "protein_g", "beverage"])
            .unwrap()
    }

    fn text(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from_text(c)).collect()
    }

    #[test]
    fn builds_typed_record_and_keeps_extra_text() {
        let record = build_record(&schema(), 1, text(&[" Coffee ", "3", "175", "0", "0.3", "Brewed"])).unwrap();
        assert_eq!(record.category.as_deref(), Some("Coffee"));
        assert_eq!(record.calories, 3.0);
        assert_eq!(record.caffeine_mg, Some(175.0));
        assert_eq!(record.protein_g, 0.3);
        assert_eq!(record.extra, vec!["Brewed".to_string()]);
    }

    #[test]
    fn empty_caffeine_is_missing_not_an_error() {
        let record = build_record(&schema(), 1, text(&["Tea", "0", "", "0", "0", "Tazo"])).unwrap();
        assert_eq!(NumericColumn::CaffeineMg.value(&record), None);
    }

    #[test]
    fn empty_required_value_is_rejected() {
        let err = build_record(&schema(), 4, text(&["Tea", "", "10", "0", "0", "x"])).unwrap_err();
        assert!(matches!(err, LoadError::MissingValue { row: 4, column: "calories" }));
    }

    #[test]
    fn non_numeric_and_negative_values_are_rejected() {
        let err = build_record(&schema(), 2, text(&["Tea", "lots", "10", "0", "0", "x"])).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { row: 2, column: "calories", .. }));

        let err = build_record(&schema(), 3, text(&["Tea", "10", "10", "-1", "0", "x"])).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { column: "sugars_g", .. }));
    }

    #[test]
    fn numeric_category_is_normalized_to_text() {
        let cells = vec![
            Cell::Number(7.0),
            Cell::Number(1.0),
            Cell::Null,
            Cell::Number(2.0),
            Cell::Number(3.0),
            Cell::Null,
        ];
        let record = build_record(&schema(), 1, cells).unwrap();
        assert_eq!(record.category.as_deref(), Some("7"));
        assert_eq!(record.extra, vec![String::new()]);
    }

    #[test]
    fn json_cells_map_by_type() {
        assert_eq!(json_to_cell(&serde_json::json!(null)), Cell::Null);
        assert_eq!(json_to_cell(&serde_json::json!(12)), Cell::Number(12.0));
        assert_eq!(json_to_cell(&serde_json::json!("  ")), Cell::Null);
        assert_eq!(json_to_cell(&serde_json::json!(true)), Cell::Text("true".into()));
    }
}
