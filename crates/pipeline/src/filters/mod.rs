//! Filter implementations for the post-query pipeline.

pub mod calories;

// Re-export for convenience
pub use calories::CaloriesFilter;
