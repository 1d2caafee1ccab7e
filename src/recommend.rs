use std::fmt;

use crate::data::model::{Dataset, NumericColumn};
use crate::stats::group_means;

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Thresholds for the per-category advisories. Both comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationRules {
    /// Mean sugar (g) above which a reduced-sugar variant is advised.
    pub sugar_threshold_g: f64,
    /// Mean calories above which a lighter version is advised.
    pub calorie_threshold: f64,
}

impl Default for RecommendationRules {
    fn default() -> Self {
        Self {
            sugar_threshold_g: 30.0,
            calorie_threshold: 250.0,
        }
    }
}

// ---------------------------------------------------------------------------
// General recommendations (static)
// ---------------------------------------------------------------------------

/// A fixed recommendation theme with its bullet points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: &'static str,
    pub points: &'static [&'static str],
}

pub const GENERAL_THEMES: [Theme; 4] = [
    Theme {
        title: "Recipe optimization",
        points: &[
            "Reduce the sugar content of Frappuccino drinks and sweet lattes",
            "Develop 'light' versions of popular drinks with fewer calories",
        ],
    },
    Theme {
        title: "Menu segmentation",
        points: &[
            "Create separate categories for healthy drinks (low-calorie, high-protein, sugar-free)",
            "Promote high-protein drinks to athletes and health-conscious customers",
        ],
    },
    Theme {
        title: "Nutritional labeling",
        points: &[
            "Show nutrition facts on the menu and in the app",
            "Offer a way to filter drinks by dietary requirements",
        ],
    },
    Theme {
        title: "New product lines",
        points: &[
            "Create 'healthy' drink bundles for different target groups",
            "Offer more options with alternative milks (soy, almond, oat)",
        ],
    },
];

// ---------------------------------------------------------------------------
// Per-category recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    ReduceSugar,
    LighterVersion,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::ReduceSugar => f.write_str("develop reduced-sugar variants"),
            Advisory::LighterVersion => f.write_str("offer 'light' versions with fewer calories"),
        }
    }
}

/// Means and advisories for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecommendation {
    pub category: String,
    pub mean_calories: f64,
    pub mean_sugars_g: f64,
    pub advisories: Vec<Advisory>,
}

impl CategoryRecommendation {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{}:", self.category),
            format!("  - Average calories: {:.1} kcal", self.mean_calories),
            format!("  - Average sugar: {:.1} g", self.mean_sugars_g),
        ];
        lines.extend(
            self.advisories
                .iter()
                .map(|a| format!("  * Recommendation: {a}")),
        );
        lines
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryRecommendations {
    /// One entry per category label, ascending.
    PerCategory(Vec<CategoryRecommendation>),
    /// The dataset has no category column.
    NoCategoryData,
}

/// Output of [`recommend`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub general: &'static [Theme],
    pub by_category: CategoryRecommendations,
}

impl Recommendations {
    /// Numbered themes with indented bullet points.
    pub fn general_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (i, theme) in self.general.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.push(format!("{}. {}:", i + 1, theme.title));
            lines.extend(theme.points.iter().map(|p| format!("   - {p}")));
        }
        lines
    }

    pub fn category_lines(&self) -> Vec<String> {
        match &self.by_category {
            CategoryRecommendations::NoCategoryData => {
                vec!["No category data found".to_string()]
            }
            CategoryRecommendations::PerCategory(items) => {
                let mut lines = Vec::new();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        lines.push(String::new());
                    }
                    lines.extend(item.lines());
                }
                lines
            }
        }
    }
}

/// Build the general and per-category recommendations for `dataset`.
pub fn recommend(dataset: &Dataset, rules: &RecommendationRules) -> Recommendations {
    let by_category = if dataset.has_category() {
        let items = group_means(dataset, &[NumericColumn::Calories, NumericColumn::SugarsG])
            .into_iter()
            .filter_map(|(category, means)| {
                let mean_calories = *means.get(&NumericColumn::Calories)?;
                let mean_sugars_g = *means.get(&NumericColumn::SugarsG)?;
                let mut advisories = Vec::new();
                if mean_sugars_g > rules.sugar_threshold_g {
                    advisories.push(Advisory::ReduceSugar);
                }
                if mean_calories > rules.calorie_threshold {
                    advisories.push(Advisory::LighterVersion);
                }
                Some(CategoryRecommendation {
                    category,
                    mean_calories,
                    mean_sugars_g,
                    advisories,
                })
            })
            .collect();
        CategoryRecommendations::PerCategory(items)
    } else {
        CategoryRecommendations::NoCategoryData
    };

    Recommendations {
        general: &GENERAL_THEMES,
        by_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, sample};
    use crate::data::model::{Record, Schema};

    fn per_category(recs: &Recommendations) -> &[CategoryRecommendation] {
        match &recs.by_category {
            CategoryRecommendations::PerCategory(items) => items,
            CategoryRecommendations::NoCategoryData => panic!("expected category data"),
        }
    }

    #[test]
    fn classic_gets_sugar_advisory_only() {
        let recs = recommend(&sample(), &RecommendationRules::default());
        let items = per_category(&recs);
        assert_eq!(items[0].category, "Classic");
        assert_eq!(items[0].mean_sugars_g, 37.5);
        assert_eq!(items[0].mean_calories, 250.0);
        assert_eq!(items[0].advisories, vec![Advisory::ReduceSugar]);
        assert_eq!(items[1].category, "Light");
        assert!(items[1].advisories.is_empty());
    }

    #[test]
    fn both_advisories_can_co_occur() {
        let data = Dataset::new(
            crate::data::model::tests::basic_schema(),
            vec![record("Frappuccino", 400.0, 60.0, 90.0, 5.0)],
        );
        let recs = recommend(&data, &RecommendationRules::default());
        assert_eq!(
            per_category(&recs)[0].advisories,
            vec![Advisory::ReduceSugar, Advisory::LighterVersion]
        );
        assert_eq!(
            recs.category_lines(),
            vec![
                "Frappuccino:",
                "  - Average calories: 400.0 kcal",
                "  - Average sugar: 60.0 g",
                "  * Recommendation: develop reduced-sugar variants",
                "  * Recommendation: offer 'light' versions with fewer calories",
            ]
        );
    }

    #[test]
    fn missing_category_column_degrades_to_notice() {
        let schema = Schema::from_headers(&["calories", "caffeine_mg", "sugars_g", "protein_g"]).unwrap();
        let data = Dataset::new(
            schema,
            vec![Record {
                category: None,
                calories: 500.0,
                caffeine_mg: None,
                sugars_g: 80.0,
                protein_g: 1.0,
                extra: Vec::new(),
            }],
        );
        let recs = recommend(&data, &RecommendationRules::default());
        assert_eq!(recs.by_category, CategoryRecommendations::NoCategoryData);
        assert_eq!(recs.category_lines(), vec!["No category data found"]);
        assert_eq!(recs.general.len(), 4);
    }

    #[test]
    fn general_themes_are_numbered() {
        let lines = recommend(&sample(), &RecommendationRules::default()).general_lines();
        assert_eq!(lines[0], "1. Recipe optimization:");
        assert!(lines.contains(&"4. New product lines:".to_string()));
        assert!(lines[1].starts_with("   - "));
    }
}
