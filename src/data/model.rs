use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::error::LoadError;

/// Header of the category column.
pub const CATEGORY_COLUMN: &str = "beverage_category";

/// Label of rows whose category cell is empty.
pub const MISSING_CATEGORY: &str = "(missing)";

// ---------------------------------------------------------------------------
// NumericColumn – the four typed nutrition columns
// ---------------------------------------------------------------------------

/// The numeric nutrition columns every dataset must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericColumn {
    Calories,
    CaffeineMg,
    SugarsG,
    ProteinG,
}

impl NumericColumn {
    /// All numeric columns, in report order.
    pub const ALL: [NumericColumn; 4] = [
        NumericColumn::Calories,
        NumericColumn::CaffeineMg,
        NumericColumn::SugarsG,
        NumericColumn::ProteinG,
    ];

    /// Header name in the source file.
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::Calories => "calories",
            NumericColumn::CaffeineMg => "caffeine_mg",
            NumericColumn::SugarsG => "sugars_g",
            NumericColumn::ProteinG => "protein_g",
        }
    }

    /// Look a column up by its header name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Only caffeine may be left empty in the source.
    pub fn is_optional(self) -> bool {
        matches!(self, NumericColumn::CaffeineMg)
    }

    /// The record's value for this column, `None` when missing.
    pub fn value(self, record: &Record) -> Option<f64> {
        match self {
            NumericColumn::Calories => Some(record.calories),
            NumericColumn::CaffeineMg => record.caffeine_mg,
            NumericColumn::SugarsG => Some(record.sugars_g),
            NumericColumn::ProteinG => Some(record.protein_g),
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the file
// ---------------------------------------------------------------------------

/// A single beverage (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Category label; `None` only when the file has no category column.
    pub category: Option<String>,
    pub calories: f64,
    /// Empty cells in the source are kept as `None`.
    pub caffeine_mg: Option<f64>,
    pub sugars_g: f64,
    pub protein_g: f64,
    /// Remaining columns as raw text, in [`Schema::extra_columns`] order.
    pub extra: Vec<String>,
}

impl Record {
    /// Text shown for `column` in the table view.
    pub fn display(&self, column: &Column) -> String {
        match column {
            Column::Category => self.category.clone().unwrap_or_default(),
            Column::Numeric(col) => col.value(self).map(format_number).unwrap_or_default(),
            Column::Extra(idx) => self.extra.get(*idx).cloned().unwrap_or_default(),
        }
    }
}

/// Raw rendering of a numeric value (`200` rather than `200.0`).
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Normalize a category cell to its canonical label.
///
/// An empty cell becomes [`MISSING_CATEGORY`] so that it stays selectable;
/// the empty selection means "any category".
pub fn normalize_category(raw: &str) -> String {
    match raw.trim() {
        "" => MISSING_CATEGORY.to_string(),
        label => label.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Schema – named, typed columns validated once at load time
// ---------------------------------------------------------------------------

/// Role of a source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    Category,
    Numeric(NumericColumn),
    /// Index into [`Record::extra`].
    Extra(usize),
}

/// Ordered column layout shared by every record of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<(String, Column)>,
}

impl Schema {
    /// Classify source headers and check the required columns are present.
    ///
    /// The category column is optional: without it the dataset loads, but
    /// per-category output degrades to a notice.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(headers.len());
        let mut extra = 0usize;

        for header in headers {
            let name = header.as_ref().trim();
            if !seen.insert(name.to_string()) {
                return Err(LoadError::DuplicateColumn(name.to_string()));
            }
            let column = if name == CATEGORY_COLUMN {
                Column::Category
            } else if let Some(col) = NumericColumn::from_name(name) {
                Column::Numeric(col)
            } else {
                extra += 1;
                Column::Extra(extra - 1)
            };
            columns.push((name.to_string(), column));
        }

        for col in NumericColumn::ALL {
            if !columns.iter().any(|(_, c)| *c == Column::Numeric(col)) {
                return Err(LoadError::MissingColumn(col.name()));
            }
        }

        Ok(Schema { columns })
    }

    /// Columns in source order.
    pub fn columns(&self) -> &[(String, Column)] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn has_category(&self) -> bool {
        self.columns.iter().any(|(_, c)| *c == Column::Category)
    }

    /// Names of the untyped columns, in [`Record::extra`] order.
    pub fn extra_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, c)| matches!(c, Column::Extra(_)))
            .map(|(n, _)| n.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// An immutable table of records sharing one [`Schema`].
///
/// Filtering never mutates a dataset; it builds a new one that shares the
/// schema of its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    schema: Arc<Schema>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(schema: Schema, records: Vec<Record>) -> Self {
        Self::with_schema(Arc::new(schema), records)
    }

    /// Build a dataset over an existing (shared) schema.
    pub fn with_schema(schema: Arc<Schema>, records: Vec<Record>) -> Self {
        let has_category = schema.has_category();
        let extra = schema.extra_columns().len();
        debug_assert!(records
            .iter()
            .all(|r| r.category.is_some() == has_category && r.extra.len() == extra));
        Dataset { schema, records }
    }

    /// A dataset over the same schema holding only `records`.
    pub fn derive(&self, records: Vec<Record>) -> Self {
        Self::with_schema(Arc::clone(&self.schema), records)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_category(&self) -> bool {
        self.schema.has_category()
    }

    /// Sorted unique category labels.
    pub fn categories(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Present (non-missing) values of one numeric column, in row order.
    pub fn values(&self, column: NumericColumn) -> Vec<f64> {
        self.records.iter().filter_map(|r| column.value(r)).collect()
    }

    /// Values of the untyped column `idx`, provided every non-empty cell
    /// parses as a finite number. Empty cells are skipped.
    pub fn numeric_extra(&self, idx: usize) -> Option<Vec<f64>> {
        let mut values = Vec::new();
        for record in &self.records {
            let cell = record.extra.get(idx)?.trim();
            if cell.is_empty() {
                continue;
            }
            match cell.parse::<f64>() {
                Ok(v) if v.is_finite() => values.push(v),
                _ => return None,
            }
        }
        Some(values)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(category: &str, calories: f64, sugars: f64, caffeine: f64, protein: f64) -> Record {
        Record {
            category: Some(category.to_string()),
            calories,
            caffeine_mg: Some(caffeine),
            sugars_g: sugars,
            protein_g: protein,
            extra: Vec::new(),
        }
    }

    pub(crate) fn basic_schema() -> Schema {
        Schema::from_headers(&[CATEGORY_COLUMN, "calories", "caffeine_mg", "sugars_g", "protein_g"])
            .expect("schema")
    }

    /// Three-row example dataset used across the unit tests.
    pub(crate) fn sample() -> Dataset {
        Dataset::new(
            basic_schema(),
            vec![
                record("Classic", 200.0, 35.0, 75.0, 2.0),
                record("Classic", 300.0, 40.0, 150.0, 3.0),
                record("Light", 100.0, 10.0, 50.0, 5.0),
            ],
        )
    }

    #[test]
    fn schema_classifies_columns_in_source_order() {
        let schema = Schema::from_headers(&[
            "beverage",
            CATEGORY_COLUMN,
            "calories",
            "caffeine_mg",
            "sugars_g",
            "protein_g",
            "beverage_prep",
        ])
        .unwrap();

        assert!(schema.has_category());
        assert_eq!(schema.extra_columns(), vec!["beverage", "beverage_prep"]);
        assert_eq!(schema.columns()[6].1, Column::Extra(1));
        assert_eq!(schema.column_names()[2], "calories");
    }

    #[test]
    fn schema_requires_every_numeric_column() {
        let err = Schema::from_headers(&[CATEGORY_COLUMN, "calories", "sugars_g", "protein_g"])
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("caffeine_mg")));
    }

    #[test]
    fn schema_rejects_duplicate_headers() {
        let err = Schema::from_headers(&["calories", "calories"]).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateColumn(name) if name == "calories"));
    }

    #[test]
    fn category_column_is_optional() {
        let schema = Schema::from_headers(&["calories", "caffeine_mg", "sugars_g", "protein_g"]).unwrap();
        assert!(!schema.has_category());
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        assert_eq!(sample().categories(), vec!["Classic", "Light"]);
    }

    #[test]
    fn empty_category_gets_a_selectable_label() {
        assert_eq!(normalize_category("  Tea "), "Tea");
        assert_eq!(normalize_category(" "), MISSING_CATEGORY);
    }

    #[test]
    fn numeric_extra_needs_every_cell_to_parse() {
        let schema = Schema::from_headers(&["calories", "caffeine_mg", "sugars_g", "protein_g", "fat", "size"])
            .unwrap();
        let mut a = record("x", 1.0, 1.0, 1.0, 1.0);
        let mut b = a.clone();
        a.category = None;
        b.category = None;
        a.extra = vec!["2.5".into(), "Tall".into()];
        b.extra = vec![String::new(), "12".into()];
        let data = Dataset::new(schema, vec![a, b]);
        assert_eq!(data.numeric_extra(0), Some(vec![2.5]));
        assert_eq!(data.numeric_extra(1), None);
    }

    #[test]
    fn display_renders_raw_numbers_and_blanks() {
        let mut r = record("Classic", 200.0, 35.5, 75.0, 2.0);
        r.caffeine_mg = None;
        assert_eq!(r.display(&Column::Numeric(NumericColumn::Calories)), "200");
        assert_eq!(r.display(&Column::Numeric(NumericColumn::SugarsG)), "35.5");
        assert_eq!(r.display(&Column::Numeric(NumericColumn::CaffeineMg)), "");
        assert_eq!(r.display(&Column::Category), "Classic");
    }
}
