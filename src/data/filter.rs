use std::fmt;

use super::model::{Dataset, NumericColumn, Record};
use crate::error::{FilterInputError, InvalidBound};

// ---------------------------------------------------------------------------
// Bound – a validated numeric threshold
// ---------------------------------------------------------------------------

/// A finite, non-negative filter threshold.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Bound(f64);

impl Bound {
    /// `None` for NaN, infinities and negative values.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Bound(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// The four numeric filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundField {
    CaloriesMax,
    CaffeineMin,
    SugarsMax,
    ProteinMin,
}

impl BoundField {
    pub const ALL: [BoundField; 4] = [
        BoundField::CaloriesMax,
        BoundField::CaffeineMin,
        BoundField::SugarsMax,
        BoundField::ProteinMin,
    ];

    /// Column the bound is checked against.
    pub fn column(self) -> NumericColumn {
        match self {
            BoundField::CaloriesMax => NumericColumn::Calories,
            BoundField::CaffeineMin => NumericColumn::CaffeineMg,
            BoundField::SugarsMax => NumericColumn::SugarsG,
            BoundField::ProteinMin => NumericColumn::ProteinG,
        }
    }

    /// `true` for "max" fields (`value <= bound`), `false` for "min" fields.
    pub fn is_upper(self) -> bool {
        matches!(self, BoundField::CaloriesMax | BoundField::SugarsMax)
    }

    pub fn label(self) -> &'static str {
        match self {
            BoundField::CaloriesMax => "Calories up to",
            BoundField::CaffeineMin => "Caffeine from",
            BoundField::SugarsMax => "Sugar up to",
            BoundField::ProteinMin => "Protein from",
        }
    }

    /// Inclusive comparison of a record against `bound`.
    ///
    /// A missing value never satisfies a bound.
    pub fn holds(self, record: &Record, bound: Bound) -> bool {
        match self.column().value(record) {
            Some(v) if self.is_upper() => v <= bound.value(),
            Some(v) => v >= bound.value(),
            None => false,
        }
    }
}

impl fmt::Display for BoundField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// FilterSpec – parsed, conjunctive constraints
// ---------------------------------------------------------------------------

/// A conjunction of optional constraints. Absent constraints do not
/// restrict anything; the default spec keeps every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// Exact category label.
    pub category: Option<String>,
    pub calories_max: Option<Bound>,
    pub caffeine_min: Option<Bound>,
    pub sugars_max: Option<Bound>,
    pub protein_min: Option<Bound>,
}

impl FilterSpec {
    pub fn bound(&self, field: BoundField) -> Option<Bound> {
        match field {
            BoundField::CaloriesMax => self.calories_max,
            BoundField::CaffeineMin => self.caffeine_min,
            BoundField::SugarsMax => self.sugars_max,
            BoundField::ProteinMin => self.protein_min,
        }
    }

    pub fn set_bound(&mut self, field: BoundField, bound: Option<Bound>) {
        let slot = match field {
            BoundField::CaloriesMax => &mut self.calories_max,
            BoundField::CaffeineMin => &mut self.caffeine_min,
            BoundField::SugarsMax => &mut self.sugars_max,
            BoundField::ProteinMin => &mut self.protein_min,
        };
        *slot = bound;
    }

    /// Whether no constraint is present.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && BoundField::ALL.iter().all(|f| self.bound(*f).is_none())
    }

    /// Whether `record` satisfies every present constraint.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(category) = &self.category {
            if record.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        BoundField::ALL
            .iter()
            .all(|&field| self.bound(field).map_or(true, |b| field.holds(record, b)))
    }
}

// ---------------------------------------------------------------------------
// FilterInput – raw text as typed by the user
// ---------------------------------------------------------------------------

/// Filter fields as entered in the UI (or on the command line), before
/// validation. Empty text means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    pub category: String,
    pub calories_max: String,
    pub caffeine_min: String,
    pub sugars_max: String,
    pub protein_min: String,
}

impl FilterInput {
    pub fn text(&self, field: BoundField) -> &str {
        match field {
            BoundField::CaloriesMax => &self.calories_max,
            BoundField::CaffeineMin => &self.caffeine_min,
            BoundField::SugarsMax => &self.sugars_max,
            BoundField::ProteinMin => &self.protein_min,
        }
    }

    pub fn text_mut(&mut self, field: BoundField) -> &mut String {
        match field {
            BoundField::CaloriesMax => &mut self.calories_max,
            BoundField::CaffeineMin => &mut self.caffeine_min,
            BoundField::SugarsMax => &mut self.sugars_max,
            BoundField::ProteinMin => &mut self.protein_min,
        }
    }

    /// Validate every field at once.
    ///
    /// Either all numeric fields parse and a complete [`FilterSpec`] is
    /// returned, or the error lists every offending field.
    pub fn parse(&self) -> Result<FilterSpec, FilterInputError> {
        let mut spec = FilterSpec {
            category: Some(self.category.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            ..FilterSpec::default()
        };
        let mut invalid = Vec::new();

        for field in BoundField::ALL {
            let raw = self.text(field).trim();
            if raw.is_empty() {
                continue;
            }
            match raw.parse::<f64>().ok().and_then(Bound::new) {
                Some(bound) => spec.set_bound(field, Some(bound)),
                None => invalid.push(InvalidBound {
                    field,
                    input: raw.to_string(),
                }),
            }
        }

        if invalid.is_empty() {
            Ok(spec)
        } else {
            Err(FilterInputError { fields: invalid })
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of records that pass every constraint of `spec`.
pub fn filtered_indices(dataset: &Dataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| spec.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Derive the dataset of records passing `spec`, in source order.
///
/// An empty spec yields a dataset equal to `dataset`; applying the same
/// spec to its own result changes nothing.
pub fn apply_filters(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    if spec.is_empty() {
        return dataset.clone();
    }
    let records = dataset
        .records()
        .iter()
        .filter(|r| spec.matches(r))
        .cloned()
        .collect();
    dataset.derive(records)
}
