//! Query planning and post-query filtering for recipe search.
//!
//! This crate provides:
//! - Comparison parsing for numeric filters (`">=4.5"`, `"<60"`, `"5"`)
//! - `SearchPlan`, the translation of search filters into a store query
//!   plus an optional deferred calories filter
//! - Nutrient extraction (`"389 kcal"` -> 389.0)
//! - Filter trait and FilterPipeline for filters applied to fetched records
//!
//! ## Architecture
//! A search runs in two stages:
//! 1. The store-native part of the plan is handed to the record store
//! 2. Deferred filters run over whatever the store returned
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, SearchParams, SearchPlan};
//!
//! let plan = SearchPlan::build(&params);
//! let recipes = store.find(plan.query()).await?;
//! let recipes = match plan.deferred() {
//!     Some(calories) => FilterPipeline::new().add_filter(*calories).apply(recipes)?,
//!     None => recipes,
//! };
//! ```

pub mod comparison;
pub mod extract;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod query;

// Re-export main types
pub use comparison::{Comparison, parse_comparison};
pub use extract::{extract_calories, extract_nutrient};
pub use filter_pipeline::FilterPipeline;
pub use filters::CaloriesFilter;
pub use query::{FieldPredicate, RecipeField, SearchParams, SearchPlan, StoreQuery};
pub use traits::Filter;
