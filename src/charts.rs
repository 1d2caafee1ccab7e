use crate::data::model::{Dataset, NumericColumn};
use crate::stats::{quantile_sorted, sorted};

/// Knobs for chart preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSettings {
    pub histogram_bins: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self { histogram_bins: 20 }
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One histogram bar covering `[start, end)` (the last bin is closed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width bins spanning the data range. A constant series is centred in
/// a unit-wide range.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: lo + width * i as f64,
            end: lo + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// Five-number box summary with 1.5 × IQR whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Values beyond the whiskers, ascending.
    pub outliers: Vec<f64>,
}

pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let sorted = sorted(values);
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let median = quantile_sorted(&sorted, 0.5)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let inside = sorted.iter().copied().filter(|v| (lo_fence..=hi_fence).contains(v));
    let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min).min(q1);
    let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max).max(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| !(lo_fence..=hi_fence).contains(v))
        .collect();

    Some(BoxSummary {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}

// ---------------------------------------------------------------------------
// The four charts
// ---------------------------------------------------------------------------

/// Everything the chart grid needs, derived from one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Distribution of calories.
    pub calorie_histogram: Vec<HistogramBin>,
    /// Mean sugar per category, highest first. `None` without a category
    /// column.
    pub sugar_by_category: Option<Vec<(String, f64)>>,
    /// `[sugars_g, calories]` per record.
    pub sugar_vs_calories: Vec<[f64; 2]>,
    /// Caffeine distribution over non-missing values.
    pub caffeine_box: Option<BoxSummary>,
}

/// Prepare the four charts. `None` for an empty dataset: charts need at
/// least one record.
pub fn chart_data(dataset: &Dataset, settings: &ChartSettings) -> Option<ChartData> {
    if dataset.is_empty() {
        return None;
    }

    let sugar_by_category = dataset.has_category().then(|| {
        let mut bars: Vec<(String, f64)> =
            crate::stats::group_means(dataset, &[NumericColumn::SugarsG])
                .into_iter()
                .filter_map(|(label, means)| {
                    means.get(&NumericColumn::SugarsG).map(|m| (label, *m))
                })
                .collect();
        // Stable sort keeps ascending labels among equal means.
        bars.sort_by(|a, b| b.1.total_cmp(&a.1));
        bars
    });

    Some(ChartData {
        calorie_histogram: histogram(
            &dataset.values(NumericColumn::Calories),
            settings.histogram_bins,
        ),
        sugar_by_category,
        sugar_vs_calories: dataset
            .records()
            .iter()
            .map(|r| [r.sugars_g, r.calories])
            .collect(),
        caffeine_box: box_summary(&dataset.values(NumericColumn::CaffeineMg)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{basic_schema, sample};

    #[test]
    fn histogram_counts_every_value_once() {
        let bins = histogram(&[0.0, 1.0, 2.0, 10.0], 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[1].count, 1);
        // max lands in the closed last bin
        assert_eq!(bins[4].count, 1);
        assert_eq!(bins[4].end, 10.0);
    }

    #[test]
    fn histogram_of_constant_series_is_centred() {
        let bins = histogram(&[5.0, 5.0], 2);
        assert_eq!(bins[0].start, 4.5);
        assert_eq!(bins[1].end, 5.5);
        assert_eq!(bins[1].count, 2);
    }

    #[test]
    fn box_summary_flags_outliers() {
        let b = box_summary(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!((b.q1, b.median, b.q3), (2.0, 3.0, 4.0));
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 4.0);
        assert_eq!(b.outliers, vec![100.0]);
    }

    #[test]
    fn sugar_bars_sorted_by_mean_descending() {
        let charts = chart_data(&sample(), &ChartSettings::default()).unwrap();
        let bars = charts.sugar_by_category.unwrap();
        assert_eq!(bars[0], ("Classic".to_string(), 37.5));
        assert_eq!(bars[1], ("Light".to_string(), 10.0));
        assert_eq!(charts.sugar_vs_calories[2], [10.0, 100.0]);
        assert_eq!(charts.calorie_histogram.len(), 20);
    }

    #[test]
    fn empty_dataset_has_no_charts() {
        let empty = Dataset::new(basic_schema(), Vec::new());
        assert!(chart_data(&empty, &ChartSettings::default()).is_none());
    }
}
