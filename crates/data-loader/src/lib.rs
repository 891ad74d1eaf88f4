//! # Data Loader Crate
//!
//! This crate handles loading raw recipe dumps and shaping them into the
//! canonical records the store keeps.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RawRecipe, RecipeRecord, Recipe)
//! - **parser**: Numeric normalization and record shaping
//! - **loader**: Read JSON dumps from disk and prepare them for import
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{load_raw_records, prepare_records};
//! use std::path::Path;
//!
//! let rows = load_raw_records(Path::new("data/US_recipes_null.Pdf.json"))?;
//! let records = prepare_records(&rows);
//!
//! println!("{} of {} rows are recipes", records.len(), rows.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod loader;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use loader::{load_raw_records, parse_raw_records, prepare_records};
pub use parser::{normalize_numeric, shape_record};
pub use types::{
    // Type aliases
    RecipeId,
    Nutrients,
    // Core types
    RawRecipe,
    Recipe,
    RecipeRecord,
};
