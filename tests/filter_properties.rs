use beverage_insights::data::filter::{filtered_indices, Bound, BoundField};
use beverage_insights::data::model::{Schema, CATEGORY_COLUMN};
use beverage_insights::{apply_filters, Dataset, FilterInput, FilterSpec, Record};
use proptest::prelude::*;

const CATEGORIES: [&str; 3] = ["Classic", "Light", "Tea"];

fn schema() -> Schema {
    Schema::from_headers(&[CATEGORY_COLUMN, "calories", "caffeine_mg", "sugars_g", "protein_g"])
        .expect("schema")
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        prop::sample::select(CATEGORIES.to_vec()),
        0u32..500,
        prop::option::of(0u32..400),
        0u32..80,
        0u32..20,
    )
        .prop_map(|(category, calories, caffeine, sugars, protein)| Record {
            category: Some(category.to_string()),
            calories: calories as f64,
            caffeine_mg: caffeine.map(f64::from),
            sugars_g: sugars as f64,
            protein_g: protein as f64,
            extra: Vec::new(),
        })
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(record_strategy(), 0..40).prop_map(|records| Dataset::new(schema(), records))
}

fn bound_strategy() -> impl Strategy<Value = Option<Bound>> {
    prop::option::of((0u32..500).prop_map(|v| Bound::new(v as f64).expect("non-negative")))
}

fn spec_strategy() -> impl Strategy<Value = FilterSpec> {
    (
        prop::option::of(prop::sample::select(CATEGORIES.to_vec())),
        bound_strategy(),
        bound_strategy(),
        bound_strategy(),
        bound_strategy(),
    )
        .prop_map(|(category, calories_max, caffeine_min, sugars_max, protein_min)| FilterSpec {
            category: category.map(str::to_string),
            calories_max,
            caffeine_min,
            sugars_max,
            protein_min,
        })
}

/// Independent restatement of the filter semantics.
fn satisfies(record: &Record, spec: &FilterSpec) -> bool {
    let category_ok = spec
        .category
        .as_ref()
        .map_or(true, |c| record.category.as_ref() == Some(c));
    let le = |v: Option<f64>, b: Option<Bound>| b.map_or(true, |b| v.is_some_and(|v| v <= b.value()));
    let ge = |v: Option<f64>, b: Option<Bound>| b.map_or(true, |b| v.is_some_and(|v| v >= b.value()));
    category_ok
        && le(Some(record.calories), spec.calories_max)
        && ge(record.caffeine_mg, spec.caffeine_min)
        && le(Some(record.sugars_g), spec.sugars_max)
        && ge(Some(record.protein_g), spec.protein_min)
}

proptest! {
    #[test]
    fn empty_spec_is_identity(data in dataset_strategy()) {
        prop_assert_eq!(apply_filters(&data, &FilterSpec::default()), data);
    }

    #[test]
    fn filter_is_exact(data in dataset_strategy(), spec in spec_strategy()) {
        let out = apply_filters(&data, &spec);
        for record in out.records() {
            prop_assert!(satisfies(record, &spec));
        }
        let expected: Vec<Record> = data
            .records()
            .iter()
            .filter(|r| satisfies(r, &spec))
            .cloned()
            .collect();
        prop_assert_eq!(out.records(), expected.as_slice());
        prop_assert_eq!(filtered_indices(&data, &spec).len(), out.len());
    }

    #[test]
    fn filter_is_idempotent(data in dataset_strategy(), spec in spec_strategy()) {
        let once = apply_filters(&data, &spec);
        let twice = apply_filters(&once, &spec);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn text_bounds_parse_to_the_same_spec(value in 0u32..1000) {
        let input = FilterInput {
            sugars_max: format!(" {value} "),
            ..FilterInput::default()
        };
        let spec = input.parse().expect("valid number");
        prop_assert_eq!(spec.bound(BoundField::SugarsMax).map(Bound::value), Some(value as f64));
    }

    #[test]
    fn non_numeric_text_never_applies(text in "[a-zA-Z]{1,8}") {
        let input = FilterInput {
            caffeine_min: text,
            ..FilterInput::default()
        };
        let err = input.parse().unwrap_err();
        prop_assert_eq!(err.fields.len(), 1);
        prop_assert_eq!(err.fields[0].field, BoundField::CaffeineMin);
    }
}
