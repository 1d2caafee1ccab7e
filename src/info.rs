use std::fmt;

use crate::data::model::Dataset;
use crate::stats::{describe, AggregateSummary};

/// The "data info" report: size, columns, per-column statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct DataInfo {
    pub record_count: usize,
    pub columns: Vec<String>,
    pub summary: AggregateSummary,
}

impl DataInfo {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        DataInfo {
            record_count: dataset.len(),
            columns: dataset
                .schema()
                .column_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            summary: describe(dataset),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total records: {}", self.record_count),
            format!("Columns: {}", self.columns.join(", ")),
        ];
        if self.summary.columns.is_empty() {
            return lines;
        }
        lines.push(String::new());
        lines.push("Descriptive statistics for numeric columns:".to_string());
        for col in &self.summary.columns {
            lines.push(String::new());
            lines.extend(col.lines());
        }
        lines
    }
}

impl fmt::Display for DataInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
