//! # Store Crate
//!
//! The record store holding canonical recipes.
//!
//! ## Components
//!
//! ### RecordStore
//! The seam every service talks to. Reads are a rating-ordered page, a
//! filtered query and a lookup by identity; writes are batch inserts, index
//! builds and a full clear before a reload. Records are never updated.
//!
//! ### MongoStore
//! The document database backend. One handle is opened at startup and
//! shared by every request.
//!
//! ### MemoryStore
//! An in-process backend with the same query semantics, used by tests and
//! for local runs without a database.
//!
//! ## Example Usage
//!
//! ```ignore
//! use store::{MongoStore, RecordStore};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn RecordStore> =
//!     Arc::new(MongoStore::connect("mongodb://localhost:27017", "recipes_db", "recipes").await?);
//!
//! let total = store.count().await?;
//! let first_page = store.list_by_rating(0, 10).await?;
//! ```

// Public modules
pub mod error;
pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use data_loader::{Recipe, RecipeRecord};
use pipeline::StoreQuery;

// Re-export commonly used types
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// A supporting index on the recipe collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSpec {
    /// Full-text index over several fields
    Text(&'static [&'static str]),
    Ascending(&'static str),
    Descending(&'static str),
}

/// Indexes rebuilt after every import.
pub const RECIPE_INDEXES: &[IndexSpec] = &[
    IndexSpec::Text(&["title", "description"]),
    IndexSpec::Ascending("cuisine"),
    IndexSpec::Descending("rating"),
    IndexSpec::Ascending("total_time"),
    IndexSpec::Ascending("country_state"),
    IndexSpec::Ascending("continent"),
];

/// Persistent collection of recipes.
///
/// ## Design Note
/// - `Send + Sync` so one handle can be shared behind an `Arc` by every request
/// - Each call is a single round trip; there are no retries at this layer
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the name of this backend (for logging/debugging)
    fn name(&self) -> &str;

    /// Total number of stored recipes, unfiltered.
    async fn count(&self) -> Result<u64>;

    /// Recipes sorted by descending rating (unrated last), skipping `skip`
    /// and returning at most `limit`.
    async fn list_by_rating(&self, skip: u64, limit: u64) -> Result<Vec<Recipe>>;

    /// Every recipe matching `query`, unpaginated.
    async fn find(&self, query: &StoreQuery) -> Result<Vec<Recipe>>;

    /// Look up one recipe. A malformed id is simply not found.
    async fn get(&self, id: &str) -> Result<Option<Recipe>>;

    /// Insert a batch of shaped records, returning how many were written.
    async fn insert_many(&self, records: &[RecipeRecord]) -> Result<usize>;

    /// Create (or re-create) supporting indexes.
    async fn create_indexes(&self, indexes: &[IndexSpec]) -> Result<()>;

    /// Remove every stored recipe.
    async fn clear(&self) -> Result<()>;
}
