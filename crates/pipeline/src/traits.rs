//! Core traits for the post-query filtering pipeline.
//!
//! Some predicates cannot be expressed in the store's query language (the
//! calorie count lives inside free-text nutrient strings). Those run here,
//! over records that were already fetched.

use anyhow::Result;
use data_loader::Recipe;

/// Core trait for filtering fetched recipes.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across request handlers
/// - Filters take ownership of the Vec<Recipe> and return a filtered Vec
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of recipes.
    ///
    /// # Returns
    /// * `Ok(Vec<Recipe>)` - The recipes that passed
    /// * `Err` - If filtering fails
    fn apply(&self, recipes: Vec<Recipe>) -> Result<Vec<Recipe>>;
}
