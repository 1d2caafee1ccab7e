//! Descriptive statistics over the numeric columns of a [`Dataset`].
//!
//! Numeric columns are the four typed ones plus every untyped column whose
//! non-empty cells all parse as numbers. Missing values (empty cells) are
//! skipped, never counted as zero.
//! Standard deviation is the sample estimate (n − 1 in the denominator) and
//! is undefined (`None`) for fewer than two values.

use std::collections::BTreeMap;

use crate::data::model::{format_number, Column, Dataset, NumericColumn, Record};

/// Per-category means: category label → column → mean, labels ascending.
pub type GroupMeans = BTreeMap<String, BTreeMap<NumericColumn, f64>>;

// ---------------------------------------------------------------------------
// Primitive statistics
// ---------------------------------------------------------------------------

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation with Bessel's correction.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Quantile `q` in `[0, 1]` of already sorted values, linear interpolation
/// between the closest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted(values), 0.5)
}

pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

// ---------------------------------------------------------------------------
// Column summaries
// ---------------------------------------------------------------------------

/// Descriptive statistics of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    /// Header name in the source file.
    pub column: String,
    /// Number of non-missing values.
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: Option<f64>,
}

impl ColumnSummary {
    /// Summarise `values`; `None` when there is nothing to summarise.
    pub fn from_values(column: impl Into<String>, values: &[f64]) -> Option<Self> {
        let sorted = sorted(values);
        Some(ColumnSummary {
            column: column.into(),
            count: sorted.len(),
            mean: mean(&sorted)?,
            median: quantile_sorted(&sorted, 0.5)?,
            min: *sorted.first()?,
            max: *sorted.last()?,
            std_dev: sample_std_dev(&sorted),
        })
    }

    /// Report lines: two decimals for mean/median/std, raw min/max.
    pub fn lines(&self) -> Vec<String> {
        let std = self
            .std_dev
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|| "n/a".to_string());
        vec![
            format!("{}:", self.column),
            format!("  Mean: {:.2}", self.mean),
            format!("  Median: {:.2}", self.median),
            format!("  Min: {}", format_number(self.min)),
            format!("  Max: {}", format_number(self.max)),
            format!("  Std. deviation: {std}"),
        ]
    }
}

/// Everything `describe` derives from a dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateSummary {
    pub record_count: usize,
    /// One entry per numeric column that has at least one value, in source
    /// column order.
    pub columns: Vec<ColumnSummary>,
    /// Mean sugar and calories per category.
    pub category_means: GroupMeans,
}

impl AggregateSummary {
    /// `true` for an empty dataset; render nothing in that case.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    pub fn column(&self, column: NumericColumn) -> Option<&ColumnSummary> {
        self.column_named(column.name())
    }

    pub fn column_named(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.column == name)
    }
}

/// Compute the descriptive statistics of every numeric column, plus the
/// per-category means of sugar and calories.
pub fn describe(dataset: &Dataset) -> AggregateSummary {
    let columns = dataset
        .schema()
        .columns()
        .iter()
        .filter_map(|(name, column)| {
            let values = match column {
                Column::Category => return None,
                Column::Numeric(col) => dataset.values(*col),
                Column::Extra(idx) => dataset.numeric_extra(*idx)?,
            };
            ColumnSummary::from_values(name.as_str(), &values)
        })
        .collect();
    let summary = AggregateSummary {
        record_count: dataset.len(),
        columns,
        category_means: group_means(
            dataset,
            &[NumericColumn::SugarsG, NumericColumn::Calories],
        ),
    };
    log::debug!(
        "described {} records over {} columns",
        summary.record_count,
        summary.columns.len()
    );
    summary
}

/// Mean of each of `columns` per category label.
///
/// Groups are exact labels in ascending lexical order. Records without a
/// category are skipped; a column with no values in a group is left out of
/// that group's map.
pub fn group_means(dataset: &Dataset, columns: &[NumericColumn]) -> GroupMeans {
    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for record in dataset.records() {
        if let Some(category) = record.category.as_deref() {
            groups.entry(category).or_default().push(record);
        }
    }

    groups
        .into_iter()
        .map(|(label, records)| {
            let means = columns
                .iter()
                .filter_map(|&col| {
                    let values: Vec<f64> = records.iter().filter_map(|r| col.value(r)).collect();
                    mean(&values).map(|m| (col, m))
                })
                .collect();
            (label.to_string(), means)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{basic_schema, record, sample};
    use crate::data::model::{Schema, CATEGORY_COLUMN};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn describe_sample_calories() {
        let summary = describe(&sample());
        let cal = summary.column(NumericColumn::Calories).unwrap();
        assert_eq!(cal.count, 3);
        assert!(approx(cal.mean, 200.0));
        assert!(approx(cal.median, 200.0));
        assert_eq!(cal.min, 100.0);
        assert_eq!(cal.max, 300.0);
        assert!(approx(cal.std_dev.unwrap(), 100.0));
    }

    #[test]
    fn median_of_even_count_interpolates() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn empty_dataset_describes_to_empty_summary() {
        let summary = describe(&Dataset::new(basic_schema(), Vec::new()));
        assert!(summary.is_empty());
        assert!(summary.columns.is_empty());
        assert!(summary.category_means.is_empty());
    }

    #[test]
    fn single_record_collapses_and_has_no_std() {
        let data = Dataset::new(basic_schema(), vec![record("Solo", 120.0, 9.0, 30.0, 1.0)]);
        let summary = describe(&data);
        let s = summary.column(NumericColumn::SugarsG).unwrap();
        assert_eq!((s.mean, s.median, s.min, s.max), (9.0, 9.0, 9.0, 9.0));
        assert_eq!(s.std_dev, None);
        assert!(s.lines().last().unwrap().ends_with("n/a"));
    }

    #[test]
    fn missing_caffeine_values_are_skipped() {
        let mut r = record("Tea", 0.0, 0.0, 0.0, 0.0);
        r.caffeine_mg = None;
        let data = Dataset::new(basic_schema(), vec![r, record("Tea", 5.0, 1.0, 40.0, 0.0)]);
        let caffeine = describe(&data).column(NumericColumn::CaffeineMg).cloned().unwrap();
        assert_eq!(caffeine.count, 1);
        assert_eq!(caffeine.mean, 40.0);
    }

    #[test]
    fn numeric_extra_columns_are_described_in_source_order() {
        let schema = Schema::from_headers(&[
            CATEGORY_COLUMN,
            "beverage",
            "calories",
            "total_fat_g",
            "caffeine_mg",
            "sugars_g",
            "protein_g",
        ])
        .unwrap();
        let rows = [("Latte", "3.5"), ("Mocha", "7"), ("Tea", "")];
        let records = rows
            .iter()
            .map(|(name, fat)| {
                let mut r = record("Classic", 100.0, 10.0, 50.0, 1.0);
                r.extra = vec![name.to_string(), fat.to_string()];
                r
            })
            .collect();
        let summary = describe(&Dataset::new(schema, records));

        let names: Vec<&str> = summary.columns.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(names, vec!["calories", "total_fat_g", "caffeine_mg", "sugars_g", "protein_g"]);
        let fat = summary.column_named("total_fat_g").unwrap();
        assert_eq!(fat.count, 2);
        assert!(approx(fat.mean, 5.25));
    }

    #[test]
    fn group_means_by_category() {
        let means = group_means(&sample(), &[NumericColumn::Calories]);
        let labels: Vec<&str> = means.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["Classic", "Light"]);
        assert!(approx(means["Classic"][&NumericColumn::Calories], 250.0));
        assert!(approx(means["Light"][&NumericColumn::Calories], 100.0));
    }

    #[test]
    fn summary_lines_use_two_decimals_and_raw_extremes() {
        let s = ColumnSummary::from_values(NumericColumn::SugarsG.name(), &[35.0, 40.0, 10.0]).unwrap();
        assert_eq!(
            s.lines(),
            vec![
                "sugars_g:".to_string(),
                "  Mean: 28.33".to_string(),
                "  Median: 35.00".to_string(),
                "  Min: 10".to_string(),
                "  Max: 40".to_string(),
                "  Std. deviation: 16.07".to_string(),
            ]
        );
    }
}
