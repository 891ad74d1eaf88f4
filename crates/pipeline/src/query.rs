//! Translation of search filters into a store query plan.
//!
//! Recognized filters are `title`, `cuisine`, `rating`, `total_time` and
//! `calories`. The first four become store-native predicates. Calories live
//! inside the free-text nutrient table, so they come back as a deferred
//! filter the caller runs over the fetched records.

use crate::comparison::{Comparison, parse_comparison};
use crate::filters::CaloriesFilter;
use data_loader::RecipeRecord;
use serde::Deserialize;
use tracing::debug;

/// Raw filter values as they arrive from a query string or the CLI.
///
/// Absent or blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<String>,
    pub total_time: Option<String>,
    pub calories: Option<String>,
}

/// Stored fields the store can filter on directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeField {
    Title,
    Cuisine,
    Rating,
    TotalTime,
}

impl RecipeField {
    /// Field name in the stored document.
    pub fn as_str(self) -> &'static str {
        match self {
            RecipeField::Title => "title",
            RecipeField::Cuisine => "cuisine",
            RecipeField::Rating => "rating",
            RecipeField::TotalTime => "total_time",
        }
    }

    fn text(self, record: &RecipeRecord) -> Option<&str> {
        match self {
            RecipeField::Title => record.title.as_deref(),
            RecipeField::Cuisine => record.cuisine.as_deref(),
            RecipeField::Rating | RecipeField::TotalTime => None,
        }
    }

    fn number(self, record: &RecipeRecord) -> Option<f64> {
        match self {
            RecipeField::Rating => record.rating,
            RecipeField::TotalTime => record.total_time,
            RecipeField::Title | RecipeField::Cuisine => None,
        }
    }
}

/// A single store-native condition.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPredicate {
    /// Case-insensitive substring match on a text field
    Contains { field: RecipeField, needle: String },
    /// Numeric comparison on a number field
    Compare {
        field: RecipeField,
        comparison: Comparison,
        threshold: f64,
    },
}

impl FieldPredicate {
    pub fn field(&self) -> RecipeField {
        match self {
            FieldPredicate::Contains { field, .. } | FieldPredicate::Compare { field, .. } => *field,
        }
    }

    /// Evaluate against a record in memory. A missing field never matches.
    pub fn matches(&self, record: &RecipeRecord) -> bool {
        match self {
            FieldPredicate::Contains { field, needle } => field
                .text(record)
                .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
            FieldPredicate::Compare {
                field,
                comparison,
                threshold,
            } => field
                .number(record)
                .is_some_and(|value| comparison.compare(value, *threshold)),
        }
    }
}

/// Conjunction of store-native predicates. Empty means "every record".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreQuery {
    predicates: Vec<FieldPredicate>,
}

impl StoreQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate (builder pattern).
    pub fn with(mut self, predicate: FieldPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[FieldPredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluate every predicate against a record in memory.
    pub fn matches(&self, record: &RecipeRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}

/// What the search service has to run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPlan {
    /// The store can answer on its own
    Native(StoreQuery),
    /// The store answers `query`, then `calories` runs over the result
    Deferred {
        query: StoreQuery,
        calories: CaloriesFilter,
    },
}

impl SearchPlan {
    /// Build the plan for a set of filters.
    ///
    /// ## Algorithm
    /// 1. Trim every value, skip absent or blank ones
    /// 2. `title`, `cuisine` -> case-insensitive substring predicates
    /// 3. `rating`, `total_time` -> numeric predicates; a threshold that does
    ///    not parse as a number drops the filter
    /// 4. `calories` -> deferred filter, kept even when its threshold is NaN
    pub fn build(params: &SearchParams) -> Self {
        let mut query = StoreQuery::new();

        for (field, value) in [
            (RecipeField::Title, &params.title),
            (RecipeField::Cuisine, &params.cuisine),
        ] {
            if let Some(needle) = non_blank(value) {
                query = query.with(FieldPredicate::Contains {
                    field,
                    needle: needle.to_string(),
                });
            }
        }

        for (field, value) in [
            (RecipeField::Rating, &params.rating),
            (RecipeField::TotalTime, &params.total_time),
        ] {
            let Some(raw) = non_blank(value) else { continue };
            let (comparison, threshold) = parse_comparison(raw);
            if threshold.is_nan() {
                debug!("Ignoring {} filter with non-numeric value {:?}", field.as_str(), raw);
                continue;
            }
            query = query.with(FieldPredicate::Compare {
                field,
                comparison,
                threshold,
            });
        }

        match non_blank(&params.calories) {
            Some(raw) => {
                let (comparison, threshold) = parse_comparison(raw);
                SearchPlan::Deferred {
                    query,
                    calories: CaloriesFilter::new(comparison, threshold),
                }
            }
            None => SearchPlan::Native(query),
        }
    }

    /// The store-native part of the plan.
    pub fn query(&self) -> &StoreQuery {
        match self {
            SearchPlan::Native(query) | SearchPlan::Deferred { query, .. } => query,
        }
    }

    /// The deferred calories filter, if any.
    pub fn deferred(&self) -> Option<&CaloriesFilter> {
        match self {
            SearchPlan::Native(_) => None,
            SearchPlan::Deferred { calories, .. } => Some(calories),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{RawRecipe, shape_record};
    use serde_json::json;

    fn params() -> SearchParams {
        SearchParams::default()
    }

    #[test]
    fn test_empty_params_match_everything() {
        let plan = SearchPlan::build(&params());
        assert_eq!(plan, SearchPlan::Native(StoreQuery::new()));
        assert!(plan.query().is_empty());
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let plan = SearchPlan::build(&SearchParams {
            title: Some("   ".into()),
            cuisine: Some(String::new()),
            rating: Some(" ".into()),
            total_time: None,
            calories: Some("".into()),
        });
        assert_eq!(plan, SearchPlan::Native(StoreQuery::new()));
    }

    #[test]
    fn test_text_and_numeric_predicates() {
        let plan = SearchPlan::build(&SearchParams {
            title: Some("pie".into()),
            cuisine: Some("Southern".into()),
            rating: Some(">=4.5".into()),
            total_time: Some("<=60".into()),
            ..params()
        });

        let expected = StoreQuery::new()
            .with(FieldPredicate::Contains {
                field: RecipeField::Title,
                needle: "pie".into(),
            })
            .with(FieldPredicate::Contains {
                field: RecipeField::Cuisine,
                needle: "Southern".into(),
            })
            .with(FieldPredicate::Compare {
                field: RecipeField::Rating,
                comparison: Comparison::GreaterOrEqual,
                threshold: 4.5,
            })
            .with(FieldPredicate::Compare {
                field: RecipeField::TotalTime,
                comparison: Comparison::LessOrEqual,
                threshold: 60.0,
            });

        assert_eq!(plan, SearchPlan::Native(expected));
    }

    #[test]
    fn test_values_are_trimmed() {
        let plan = SearchPlan::build(&SearchParams {
            rating: Some("  >4 ".into()),
            ..params()
        });
        assert_eq!(
            plan.query().predicates(),
            &[FieldPredicate::Compare {
                field: RecipeField::Rating,
                comparison: Comparison::GreaterThan,
                threshold: 4.0,
            }]
        );
    }

    #[test]
    fn test_non_numeric_rating_is_dropped() {
        let plan = SearchPlan::build(&SearchParams {
            rating: Some(">=great".into()),
            total_time: Some("soon".into()),
            ..params()
        });
        assert!(plan.query().is_empty());
    }

    #[test]
    fn test_infinite_rating_is_kept_and_matches_nothing() {
        let plan = SearchPlan::build(&SearchParams {
            rating: Some("Infinity".into()),
            ..params()
        });
        assert_eq!(
            plan.query().predicates(),
            &[FieldPredicate::Compare {
                field: RecipeField::Rating,
                comparison: Comparison::Equal,
                threshold: f64::INFINITY,
            }]
        );

        let record = shape_record(&RawRecipe::from(json!({ "title": "Pie", "rating": 5.0 })));
        assert!(!plan.query().matches(&record));
    }

    #[test]
    fn test_calories_are_deferred() {
        let plan = SearchPlan::build(&SearchParams {
            cuisine: Some("italian".into()),
            calories: Some("<=300".into()),
            ..params()
        });

        assert_eq!(plan.query().predicates().len(), 1);
        assert_eq!(
            plan.deferred(),
            Some(&CaloriesFilter::new(Comparison::LessOrEqual, 300.0))
        );
    }

    #[test]
    fn test_nan_calories_filter_is_kept() {
        let plan = SearchPlan::build(&SearchParams {
            calories: Some("lots".into()),
            ..params()
        });

        let calories = plan.deferred().expect("calories filter should be deferred");
        assert_eq!(calories.comparison, Comparison::Equal);
        assert!(calories.threshold.is_nan());
    }

    #[test]
    fn test_in_memory_evaluation() {
        let record = shape_record(&RawRecipe::from(json!({
            "title": "Sweet Potato Pie",
            "cuisine": "Southern Recipes",
            "rating": 4.8,
            "total_time": 115
        })));

        let hit = SearchPlan::build(&SearchParams {
            title: Some("POTATO".into()),
            rating: Some(">4.5".into()),
            ..params()
        });
        assert!(hit.query().matches(&record));

        let miss = SearchPlan::build(&SearchParams {
            title: Some("potato".into()),
            total_time: Some("<60".into()),
            ..params()
        });
        assert!(!miss.query().matches(&record));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let record = shape_record(&RawRecipe::from(json!({ "title": "Toast" })));
        let plan = SearchPlan::build(&SearchParams {
            rating: Some("<5".into()),
            ..params()
        });
        assert!(!plan.query().matches(&record));
    }
}
