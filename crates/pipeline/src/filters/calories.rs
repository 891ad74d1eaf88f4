//! Deferred calorie filter.
//!
//! Calories are only available as text inside `nutrients`, so a calories
//! constraint is applied after the store query returns.

use crate::comparison::Comparison;
use crate::extract::extract_calories;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::Recipe;

/// Keeps recipes whose extracted calorie count satisfies `<op> threshold`.
///
/// ## Algorithm
/// For each recipe:
/// 1. Extract calories from the nutrient table
/// 2. Drop the recipe if there is no readable value, whatever the operator
/// 3. Otherwise keep it only if the comparison holds
///
/// A NaN threshold therefore matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaloriesFilter {
    pub comparison: Comparison,
    pub threshold: f64,
}

impl CaloriesFilter {
    pub fn new(comparison: Comparison, threshold: f64) -> Self {
        Self {
            comparison,
            threshold,
        }
    }

    /// Whether a single recipe passes.
    pub fn accepts(&self, recipe: &Recipe) -> bool {
        extract_calories(Some(&recipe.nutrients))
            .is_some_and(|calories| self.comparison.compare(calories, self.threshold))
    }
}

impl Filter for CaloriesFilter {
    fn name(&self) -> &str {
        "CaloriesFilter"
    }

    fn apply(&self, recipes: Vec<Recipe>) -> Result<Vec<Recipe>> {
        let filtered: Vec<Recipe> = recipes
            .into_iter()
            .filter(|recipe| self.accepts(recipe))
            .collect();

        Ok(filtered)
    }
}
